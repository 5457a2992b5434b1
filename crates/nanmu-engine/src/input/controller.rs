//! Virtual controller.
//!
//! Folds keyboard and gamepad events into a fixed set of logical buttons so
//! gameplay code never sees device codes. Gameplay usually asks about
//! [`Action`]s, which an [`ActionMap`] resolves to buttons.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::input::queue::{InputEvent, InputQueue};

/// The fixed set of logical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Button {
    A = 0,
    B = 1,
    X = 2,
    Y = 3,
    U = 4,
    D = 5,
    L = 6,
    R = 7,
    LB = 8,
    RB = 9,
    Back = 10,
    Start = 11,
}

impl Button {
    pub const COUNT: usize = 12;

    pub const ALL: [Button; Button::COUNT] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::U,
        Button::D,
        Button::L,
        Button::R,
        Button::LB,
        Button::RB,
        Button::Back,
        Button::Start,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Gameplay-level names for buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Jump,
    Dash,
    RunLeft,
    RunRight,
    Fall,
}

/// Which button each [`Action`] reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionMap {
    pub jump: Button,
    pub dash: Button,
    pub run_left: Button,
    pub run_right: Button,
    pub fall: Button,
}

impl Default for ActionMap {
    fn default() -> Self {
        Self {
            jump: Button::A,
            dash: Button::B,
            run_left: Button::L,
            run_right: Button::R,
            fall: Button::D,
        }
    }
}

impl ActionMap {
    pub fn get(&self, action: Action) -> Button {
        match action {
            Action::Jump => self.jump,
            Action::Dash => self.dash,
            Action::RunLeft => self.run_left,
            Action::RunRight => self.run_right,
            Action::Fall => self.fall,
        }
    }
}

/// Anything the controller can be queried with.
pub trait Control: Copy {
    fn button(self, actions: &ActionMap) -> Button;
}

impl Control for Button {
    fn button(self, _actions: &ActionMap) -> Button {
        self
    }
}

impl Control for Action {
    fn button(self, actions: &ActionMap) -> Button {
        actions.get(self)
    }
}

/// A hat axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HatAxis {
    X,
    Y,
}

/// Binds one direction of one hat axis to a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HatBinding {
    pub axis: HatAxis,
    /// Expected sign: -1 or +1.
    pub sign: i8,
    pub button: Button,
}

/// One device's worth of bindings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingSet {
    /// Keyboard key code → button.
    pub keys: HashMap<u32, Button>,
    /// Gamepad button index → button.
    pub buttons: HashMap<u32, Button>,
    /// Hat directions.
    pub hat: Vec<HatBinding>,
}

impl BindingSet {
    /// Default keyboard layout: Z/X/C/V face buttons, arrows, A/S bumpers,
    /// Escape/Enter for BACK/START. Codes are DOM `keyCode` values.
    pub fn keyboard() -> Self {
        let keys = [
            (90, Button::A),
            (88, Button::B),
            (67, Button::X),
            (86, Button::Y),
            (38, Button::U),
            (40, Button::D),
            (37, Button::L),
            (39, Button::R),
            (65, Button::LB),
            (83, Button::RB),
            (27, Button::Back),
            (13, Button::Start),
        ];
        Self {
            keys: keys.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Default gamepad layout, hat for the d-pad.
    pub fn gamepad() -> Self {
        let buttons = [
            (1, Button::A),
            (2, Button::B),
            (0, Button::X),
            (3, Button::Y),
            (4, Button::LB),
            (5, Button::RB),
            (8, Button::Back),
            (9, Button::Start),
        ];
        let hat = vec![
            HatBinding { axis: HatAxis::Y, sign: 1, button: Button::U },
            HatBinding { axis: HatAxis::Y, sign: -1, button: Button::D },
            HatBinding { axis: HatAxis::X, sign: -1, button: Button::L },
            HatBinding { axis: HatAxis::X, sign: 1, button: Button::R },
        ];
        Self {
            buttons: buttons.into_iter().collect(),
            hat,
            ..Default::default()
        }
    }
}

/// All binding sets consulted for each event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings {
    pub sets: Vec<BindingSet>,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            sets: vec![BindingSet::keyboard(), BindingSet::gamepad()],
        }
    }
}

impl Bindings {
    /// Parse bindings from a JSON array of binding sets.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Logical button state with one frame of history.
pub struct Controller {
    state: [bool; Button::COUNT],
    prev: [bool; Button::COUNT],
    bindings: Bindings,
    actions: ActionMap,
}

impl Controller {
    pub fn new() -> Self {
        Self::with_bindings(Bindings::default(), ActionMap::default())
    }

    pub fn with_bindings(bindings: Bindings, actions: ActionMap) -> Self {
        Self {
            state: [false; Button::COUNT],
            prev: [false; Button::COUNT],
            bindings,
            actions,
        }
    }

    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    pub fn set_actions(&mut self, actions: ActionMap) {
        self.actions = actions;
    }

    pub fn set_bindings(&mut self, bindings: Bindings) {
        self.bindings = bindings;
    }

    /// Snapshot the current state as the previous frame, then drain and apply
    /// this frame's events. Call exactly once per frame.
    pub fn update(&mut self, queue: &mut InputQueue) {
        self.prev = self.state;
        for event in queue.drain() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: InputEvent) {
        for set in &self.bindings.sets {
            match event {
                InputEvent::KeyDown { code } => {
                    if let Some(&b) = set.keys.get(&code) {
                        self.state[b.index()] = true;
                    }
                }
                InputEvent::KeyUp { code } => {
                    if let Some(&b) = set.keys.get(&code) {
                        self.state[b.index()] = false;
                    }
                }
                InputEvent::ButtonDown { button } => {
                    if let Some(&b) = set.buttons.get(&button) {
                        self.state[b.index()] = true;
                    }
                }
                InputEvent::ButtonUp { button } => {
                    if let Some(&b) = set.buttons.get(&button) {
                        self.state[b.index()] = false;
                    }
                }
                InputEvent::HatMotion { x, y } => {
                    for bind in &set.hat {
                        let value = match bind.axis {
                            HatAxis::X => x,
                            HatAxis::Y => y,
                        };
                        self.state[bind.button.index()] = value != 0 && value == bind.sign;
                    }
                }
                InputEvent::Quit => {}
            }
        }
    }

    pub fn pressed(&self, c: impl Control) -> bool {
        self.state[c.button(&self.actions).index()]
    }

    pub fn released(&self, c: impl Control) -> bool {
        !self.pressed(c)
    }

    /// Pressed now, not pressed last frame.
    pub fn just_pressed(&self, c: impl Control) -> bool {
        let i = c.button(&self.actions).index();
        self.state[i] && !self.prev[i]
    }

    /// Pressed last frame, released now.
    pub fn just_released(&self, c: impl Control) -> bool {
        let i = c.button(&self.actions).index();
        self.prev[i] && !self.state[i]
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}
