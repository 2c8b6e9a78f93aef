use std::fmt;

use crate::error::QueueError;

/// A queue element: an owned string value.
///
/// Elements are created when a value is inserted, and handed to the caller
/// when they are removed from a [`Queue`](crate::Queue). Dropping the element
/// releases its value and storage.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Element {
    value: String,
}

impl Element {
    /// Copies `value` into owned storage, reporting allocation failure instead
    /// of aborting.
    pub(crate) fn try_new(value: &str) -> Result<Self, QueueError> {
        let mut owned = String::new();
        owned
            .try_reserve_exact(value.len())
            .map_err(|source| QueueError::ValueAlloc {
                len: value.len(),
                source,
            })?;
        owned.push_str(value);
        Ok(Self { value: owned })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }

    /// Copies the value into `buf` as a NUL-terminated byte string, and returns
    /// the number of value bytes copied.
    ///
    /// At most `buf.len() - 1` bytes are copied; a longer value is silently
    /// truncated. The rest of `buf` is zero-filled. An empty `buf` receives
    /// nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_tail("gerbil").unwrap();
    ///
    /// let mut buf = [0xff_u8; 4];
    /// let element = queue.remove_head_into(&mut buf).unwrap();
    /// assert_eq!(&buf, b"ger\0");
    /// assert_eq!(element.value(), "gerbil");
    /// ```
    pub fn copy_into(&self, buf: &mut [u8]) -> usize {
        let room = match buf.len().checked_sub(1) {
            Some(room) => room,
            None => return 0,
        };
        let bytes = self.value.as_bytes();
        let copied = bytes.len().min(room);
        buf[..copied].copy_from_slice(&bytes[..copied]);
        buf[copied..].fill(0);
        copied
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
