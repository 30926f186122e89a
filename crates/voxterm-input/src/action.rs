//! Named actions bound to keys.

use crossterm::event::KeyCode;
use hashbrown::HashMap;

use crate::button_state::ButtonState;
use crate::keyboard::KeyboardState;
use crate::modifiers::Modifiers;

/// A key that can trigger an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    Key(KeyCode),
    /// The key together with at least these modifiers.
    KeyWithModifiers(KeyCode, Modifiers),
}

impl InputBinding {
    const fn key(self) -> KeyCode {
        match self {
            Self::Key(key) | Self::KeyWithModifiers(key, _) => key,
        }
    }

    fn modifiers_held(self, keyboard: &KeyboardState) -> bool {
        match self {
            Self::Key(_) => true,
            Self::KeyWithModifiers(_, mods) => keyboard.modifiers().contains(mods),
        }
    }
}

impl From<KeyCode> for InputBinding {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<char> for InputBinding {
    fn from(c: char) -> Self {
        Self::Key(KeyCode::Char(c))
    }
}

#[derive(Debug, Default)]
struct Action {
    bindings: Vec<InputBinding>,
    state: ButtonState,
}

/// Maps action names to one or more key bindings.
///
/// An action is down while any of its bindings is down.
#[derive(Debug, Default)]
pub struct ActionMap {
    actions: HashMap<String, Action>,
}

impl ActionMap {
    /// Create a new, empty action map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> ActionMapBuilder {
        ActionMapBuilder::default()
    }

    /// Add a binding, creating the action on first use.
    pub fn bind(&mut self, action: impl Into<String>, binding: impl Into<InputBinding>) {
        let binding = binding.into();
        let action = self.actions.entry(action.into()).or_default();
        if !action.bindings.contains(&binding) {
            action.bindings.push(binding);
        }
    }

    pub fn unbind(&mut self, action: &str, binding: InputBinding) {
        if let Some(action) = self.actions.get_mut(action) {
            action.bindings.retain(|b| *b != binding);
        }
    }

    #[must_use]
    pub fn get_bindings(&self, action: &str) -> Option<&[InputBinding]> {
        self.actions.get(action).map(|a| a.bindings.as_slice())
    }

    /// Recompute every action from the keyboard.
    pub fn update(&mut self, keyboard: &KeyboardState) {
        for action in self.actions.values_mut() {
            let active = |b: &&InputBinding| b.modifiers_held(keyboard);
            let any_pressed = action
                .bindings
                .iter()
                .filter(active)
                .any(|b| keyboard.is_pressed(b.key()));
            let any_just_pressed = action
                .bindings
                .iter()
                .filter(active)
                .any(|b| keyboard.is_just_pressed(b.key()));

            action.state = match (any_just_pressed, any_pressed, action.state.is_pressed()) {
                (true, _, false) => ButtonState::JustPressed,
                (_, true, true) => ButtonState::Pressed,
                (_, false, true) => ButtonState::JustReleased,
                (false, _, false) => ButtonState::Released,
            };
        }
    }

    #[must_use]
    pub fn is_pressed(&self, action: &str) -> bool {
        self.actions.get(action).is_some_and(|a| a.state.is_pressed())
    }

    /// Down since an earlier frame.
    #[must_use]
    pub fn is_held(&self, action: &str) -> bool {
        self.actions.get(action).is_some_and(|a| a.state.is_held())
    }

    #[must_use]
    pub fn is_just_pressed(&self, action: &str) -> bool {
        self.actions
            .get(action)
            .is_some_and(|a| a.state.is_just_pressed())
    }

    #[must_use]
    pub fn is_just_released(&self, action: &str) -> bool {
        self.actions
            .get(action)
            .is_some_and(|a| a.state.is_just_released())
    }

    pub fn end_frame(&mut self) {
        for action in self.actions.values_mut() {
            action.state.end_frame();
        }
    }
}

/// Fluent construction of an [`ActionMap`].
#[derive(Debug, Default)]
pub struct ActionMapBuilder {
    actions: ActionMap,
}

impl ActionMapBuilder {
    #[must_use]
    pub fn bind(mut self, action: impl Into<String>, binding: impl Into<InputBinding>) -> Self {
        self.actions.bind(action, binding);
        self
    }

    /// Bind several keys to one action.
    #[must_use]
    pub fn bind_many(
        mut self,
        action: impl Into<String>,
        bindings: impl IntoIterator<Item = impl Into<InputBinding>>,
    ) -> Self {
        let name = action.into();
        for binding in bindings {
            self.actions.bind(name.clone(), binding);
        }
        self
    }

    #[must_use]
    pub fn build(self) -> ActionMap {
        self.actions
    }
}
