//! Per-frame state of one key.

/// Where a key is in its press/release cycle.
///
/// ```text
/// Released ─press()─> JustPressed ─end_frame()─> Pressed
///     ^                                             │
///     │                                          release()
///     │                                             v
///     └────────────end_frame()───────────── JustReleased
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Went down during this frame.
    JustPressed,
    /// Down since an earlier frame.
    Pressed,
    /// Went up during this frame.
    JustReleased,
    #[default]
    Released,
}

impl ButtonState {
    /// Down, whether new this frame or held.
    #[inline]
    #[must_use]
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    /// Down since an earlier frame.
    #[inline]
    #[must_use]
    pub const fn is_held(self) -> bool {
        matches!(self, Self::Pressed)
    }

    #[inline]
    #[must_use]
    pub const fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed)
    }

    #[inline]
    #[must_use]
    pub const fn is_just_released(self) -> bool {
        matches!(self, Self::JustReleased)
    }

    #[inline]
    #[must_use]
    pub const fn is_released(self) -> bool {
        matches!(self, Self::JustReleased | Self::Released)
    }

    /// Mark the key down. Repeats of a held key change nothing.
    #[inline]
    pub fn press(&mut self) {
        if !self.is_pressed() {
            *self = Self::JustPressed;
        }
    }

    /// Mark the key up. A key that is already up stays as it is.
    #[inline]
    pub fn release(&mut self) {
        if self.is_pressed() {
            *self = Self::JustReleased;
        }
    }

    /// Settle the edge states once the frame is over.
    #[inline]
    pub fn end_frame(&mut self) {
        *self = match *self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased => Self::Released,
            other => other,
        };
    }
}
