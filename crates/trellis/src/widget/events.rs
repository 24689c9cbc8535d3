//! Widget event types.
//!
//! Pointer input arrives either as mouse events or as touch events. Both
//! carry an [`EventBase`] through which a handler accepts the event and, on a
//! press, may request an exclusive grab of the pointer. The widget tree
//! routes every later event of a grabbed pointer to the grabber only, and
//! marks those deliveries with [`EventBase::is_grabbed`].

use trellis_render::Point;

/// Modifier keys held while the pointer event happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    pub shift: bool,
    /// Cmd on macOS.
    pub control: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Whether at least one modifier is held.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    Left = 0,
    Right = 1,
    Middle = 2,
}

/// Identifies one pointer: the mouse, or a single touch by its platform id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

/// Where a pointer event sits in its press/move/release sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Pressed,
    Moved,
    Released,
    /// The platform aborted the sequence (touch only).
    Cancelled,
}

impl PointerPhase {
    /// Whether the pointer sequence is over after this event.
    pub fn ends_sequence(self) -> bool {
        matches!(self, Self::Released | Self::Cancelled)
    }
}

/// Delivery state shared by every pointer event.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    accepted: bool,
    /// Set by a handler that wants all further events of this pointer.
    grab_requested: bool,
    /// Set by the dispatcher when delivering through an active grab.
    grabbed: bool,
}

impl EventBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Mark handled; the tree stops offering it to other widgets.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Undo [`accept`](Self::accept).
    pub fn ignore(&mut self) {
        self.accepted = false;
    }

    /// Ask for exclusive delivery of this pointer's remaining events.
    ///
    /// Only meaningful while handling a press; the grab ends when the
    /// pointer is released or cancelled.
    pub fn grab(&mut self) {
        self.grab_requested = true;
    }

    /// Whether a handler called [`grab`](Self::grab).
    pub fn is_grab_requested(&self) -> bool {
        self.grab_requested
    }

    /// Whether this event is being delivered because the receiver holds the
    /// pointer's grab.
    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    pub(crate) fn set_grabbed(&mut self, grabbed: bool) {
        self.grabbed = grabbed;
    }
}

/// Mouse press event.
#[derive(Debug, Clone, Copy)]
pub struct MousePressEvent {
    /// Base event data.
    pub base: EventBase,
    pub button: MouseButton,
    /// Receiver-local position, rewritten at each delivery.
    pub local_pos: Point,
    /// Surface position.
    pub window_pos: Point,
    /// Screen position, when the platform knows it.
    pub global_pos: Point,
    pub modifiers: KeyboardModifiers,
}

impl MousePressEvent {
    /// Create a press at `window_pos`; `local_pos` is filled in by dispatch.
    pub fn new(button: MouseButton, window_pos: Point, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos: window_pos,
            window_pos,
            global_pos: window_pos,
            modifiers,
        }
    }
}

/// Mouse release event.
#[derive(Debug, Clone, Copy)]
pub struct MouseReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    pub button: MouseButton,
    /// Receiver-local position, rewritten at each delivery.
    pub local_pos: Point,
    /// Surface position.
    pub window_pos: Point,
    /// Screen position, when the platform knows it.
    pub global_pos: Point,
    pub modifiers: KeyboardModifiers,
}

impl MouseReleaseEvent {
    /// Create a release at `window_pos`; `local_pos` is filled in by dispatch.
    pub fn new(button: MouseButton, window_pos: Point, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos: window_pos,
            window_pos,
            global_pos: window_pos,
            modifiers,
        }
    }
}

/// Mouse move event.
#[derive(Debug, Clone, Copy)]
pub struct MouseMoveEvent {
    /// Base event data.
    pub base: EventBase,
    /// Receiver-local position, rewritten at each delivery.
    pub local_pos: Point,
    /// Surface position.
    pub window_pos: Point,
    /// Screen position, when the platform knows it.
    pub global_pos: Point,
    /// Mouse buttons currently held, one bit per [`MouseButton`].
    pub buttons: u8,
    pub modifiers: KeyboardModifiers,
}

impl MouseMoveEvent {
    /// Create a move to `window_pos`; `local_pos` is filled in by dispatch.
    pub fn new(window_pos: Point, buttons: u8, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            local_pos: window_pos,
            window_pos,
            global_pos: window_pos,
            buttons,
            modifiers,
        }
    }

    /// Whether `button` is held during the move.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        (self.buttons & (1 << button as u8)) != 0
    }
}

/// Phase of a touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Pressure reported for a touch, when the hardware provides it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchForce {
    /// Absolute force with its device maximum.
    Calibrated {
        force: f64,
        max_possible_force: f64,
        altitude_angle: Option<f64>,
    },
    /// Force already scaled to `0.0..=1.0`.
    Normalized(f64),
}

impl TouchForce {
    /// Force scaled to `0.0..=1.0`.
    pub fn normalized(&self) -> f64 {
        match *self {
            Self::Calibrated {
                force,
                max_possible_force,
                ..
            } => {
                if max_possible_force > 0.0 {
                    force / max_possible_force
                } else {
                    0.0
                }
            }
            Self::Normalized(force) => force,
        }
    }
}

/// One finger on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Platform touch id, stable for the lifetime of the touch.
    pub id: u64,
    /// Receiver-local position, rewritten at each delivery.
    pub local_pos: Point,
    /// Surface position.
    pub window_pos: Point,
    /// Screen position, when the platform knows it.
    pub global_pos: Point,
    pub phase: TouchPhase,
    pub force: Option<TouchForce>,
}

impl TouchPoint {
    /// Create a touch point without force information.
    pub fn new(
        id: u64,
        local_pos: Point,
        window_pos: Point,
        global_pos: Point,
        phase: TouchPhase,
    ) -> Self {
        Self {
            id,
            local_pos,
            window_pos,
            global_pos,
            phase,
            force: None,
        }
    }

    /// Attach force information (builder pattern).
    pub fn with_force(mut self, force: TouchForce) -> Self {
        self.force = Some(force);
        self
    }
}

/// Touch event carrying the touch point that changed.
#[derive(Debug, Clone, Copy)]
pub struct TouchEvent {
    /// Base event data.
    pub base: EventBase,
    pub point: TouchPoint,
    pub modifiers: KeyboardModifiers,
}

impl TouchEvent {
    /// Create a new touch event.
    pub fn new(point: TouchPoint, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            point,
            modifiers,
        }
    }
}

/// Enum wrapping all widget event types.
#[derive(Debug, Clone, Copy)]
pub enum WidgetEvent {
    MousePress(MousePressEvent),
    MouseRelease(MouseReleaseEvent),
    MouseMove(MouseMoveEvent),
    Touch(TouchEvent),
}

impl WidgetEvent {
    /// Shared event data.
    pub fn base(&self) -> &EventBase {
        match self {
            Self::MousePress(e) => &e.base,
            Self::MouseRelease(e) => &e.base,
            Self::MouseMove(e) => &e.base,
            Self::Touch(e) => &e.base,
        }
    }

    /// Shared event data, mutably.
    pub fn base_mut(&mut self) -> &mut EventBase {
        match self {
            Self::MousePress(e) => &mut e.base,
            Self::MouseRelease(e) => &mut e.base,
            Self::MouseMove(e) => &mut e.base,
            Self::Touch(e) => &mut e.base,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.base().is_accepted()
    }

    /// Accept the event.
    pub fn accept(&mut self) {
        self.base_mut().accept();
    }

    /// Ignore the event.
    pub fn ignore(&mut self) {
        self.base_mut().ignore();
    }

    /// The pointer this event belongs to.
    pub fn pointer_id(&self) -> PointerId {
        match self {
            Self::MousePress(_) | Self::MouseRelease(_) | Self::MouseMove(_) => PointerId::Mouse,
            Self::Touch(e) => PointerId::Touch(e.point.id),
        }
    }

    /// The pointer phase this event represents.
    pub fn phase(&self) -> PointerPhase {
        match self {
            Self::MousePress(_) => PointerPhase::Pressed,
            Self::MouseMove(_) => PointerPhase::Moved,
            Self::MouseRelease(_) => PointerPhase::Released,
            Self::Touch(e) => match e.point.phase {
                TouchPhase::Started => PointerPhase::Pressed,
                TouchPhase::Moved => PointerPhase::Moved,
                TouchPhase::Ended => PointerPhase::Released,
                TouchPhase::Cancelled => PointerPhase::Cancelled,
            },
        }
    }

    /// Surface position.
    pub fn window_pos(&self) -> Point {
        match self {
            Self::MousePress(e) => e.window_pos,
            Self::MouseRelease(e) => e.window_pos,
            Self::MouseMove(e) => e.window_pos,
            Self::Touch(e) => e.point.window_pos,
        }
    }

    /// Position in the receiving widget's coordinates.
    pub fn local_pos(&self) -> Point {
        match self {
            Self::MousePress(e) => e.local_pos,
            Self::MouseRelease(e) => e.local_pos,
            Self::MouseMove(e) => e.local_pos,
            Self::Touch(e) => e.point.local_pos,
        }
    }

    /// Rewrite the local position for the next receiver.
    pub fn set_local_pos(&mut self, pos: Point) {
        match self {
            Self::MousePress(e) => e.local_pos = pos,
            Self::MouseRelease(e) => e.local_pos = pos,
            Self::MouseMove(e) => e.local_pos = pos,
            Self::Touch(e) => e.point.local_pos = pos,
        }
    }
}
