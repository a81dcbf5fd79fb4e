/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::collections::VecDeque;

/// FIFO of pending activations, drained on a later turn of the event loop.
///
/// Owned by the widget it feeds and only touched from the UI thread.
pub struct Dispatcher<T> {
    activations: VecDeque<T>,
}

impl<T> Default for Dispatcher<T> {
    fn default() -> Self {
        Dispatcher::new()
    }
}

impl<T> Dispatcher<T> {
    pub fn new() -> Self {
        Self {
            activations: VecDeque::new(),
        }
    }

    pub fn emit(&mut self, t: T) {
        self.activations.push_back(t);
    }

    pub fn next_activation(&mut self) -> Option<T> {
        self.activations.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.activations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activations_come_out_in_order() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.emit(1);
        dispatcher.emit(2);
        assert_eq!(dispatcher.pending(), 2);
        assert_eq!(dispatcher.next_activation(), Some(1));
        assert_eq!(dispatcher.next_activation(), Some(2));
        assert_eq!(dispatcher.next_activation(), None);
        assert_eq!(dispatcher.pending(), 0);
    }
}
