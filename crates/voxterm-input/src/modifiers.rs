//! Modifier keys.

use bitflags::bitflags;
use crossterm::event::KeyModifiers;

bitflags! {
    /// Modifier keys held with a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
    }
}

impl Modifiers {
    #[inline]
    #[must_use]
    pub const fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    #[inline]
    #[must_use]
    pub const fn ctrl(self) -> bool {
        self.contains(Self::CTRL)
    }

    #[inline]
    #[must_use]
    pub const fn alt(self) -> bool {
        self.contains(Self::ALT)
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        let mut out = Self::empty();
        out.set(Self::SHIFT, mods.contains(KeyModifiers::SHIFT));
        out.set(Self::CTRL, mods.contains(KeyModifiers::CONTROL));
        out.set(Self::ALT, mods.contains(KeyModifiers::ALT));
        out
    }
}
