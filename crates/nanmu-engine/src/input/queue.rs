/// Raw input events, as delivered by the platform layer.
/// Device codes only; logical meaning comes from the controller bindings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A keyboard key was pressed.
    KeyDown { code: u32 },
    /// A keyboard key was released.
    KeyUp { code: u32 },
    /// A gamepad button was pressed.
    ButtonDown { button: u32 },
    /// A gamepad button was released.
    ButtonUp { button: u32 },
    /// The gamepad hat moved. Each axis is -1, 0 or +1; `y = +1` is up.
    HatMotion { x: i8, y: i8 },
    /// The window or host asked the game to close.
    Quit,
}

/// Per-frame queue of input events.
/// The host pushes events as they arrive; the controller drains them once per update.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take every pending event, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Whether a quit request is pending.
    pub fn quit_requested(&self) -> bool {
        self.events.iter().any(|e| matches!(e, InputEvent::Quit))
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
