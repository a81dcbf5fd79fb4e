/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::sync::Arc;

use parking_lot::Mutex;

/// A value shared between a widget and its host.
///
/// Both sides hold a clone; either may write and the other observes the new value the
/// next time it reads. Widgets detect host writes by comparing against the last value
/// they saw (see [`Binding::changed_since`]).
pub struct Binding<T> {
    value: Arc<Mutex<T>>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
        }
    }
}

impl<T: Copy + PartialEq> Binding<T> {
    pub fn new(t: T) -> Self {
        Self {
            value: Arc::new(Mutex::new(t)),
        }
    }

    pub fn get(&self) -> T {
        *self.value.lock()
    }

    /// Stores `t` and returns the previous value.
    pub fn set(&self, t: T) -> T {
        std::mem::replace(&mut *self.value.lock(), t)
    }

    pub fn changed_since(&self, seen: T) -> Option<T> {
        let current = self.get();
        (current != seen).then_some(current)
    }
}

impl<T: Copy + PartialEq + Default> Default for Binding<T> {
    fn default() -> Self {
        Binding::new(T::default())
    }
}

impl<T: Copy + PartialEq + std::fmt::Debug> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Binding").field(&self.get()).finish()
    }
}
