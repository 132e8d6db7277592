//! Keyboard controls for the grid.
//!
//! Size changes commit on the release edge of a key, not on the press, so a
//! held key (and its OS repeats) counts once. Quit is level-triggered.

use flashgrid_engine::input::{Key, KeyboardState};

use crate::grid::GridSize;

/// Edge-tracked controls.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Control {
    Increase,
    Decrease,
    /// Reserved: edges tracked, no action bound.
    Left,
    /// Reserved: edges tracked, no action bound.
    Right,
}

impl Control {
    pub const ALL: [Control; 4] = [Control::Increase, Control::Decrease, Control::Left, Control::Right];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Keys bound to each control.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyBindings {
    pub quit: Key,
    pub increase: Key,
    pub decrease: Key,
    pub left: Key,
    pub right: Key,
}

impl KeyBindings {
    pub fn key_for(&self, control: Control) -> Key {
        match control {
            Control::Increase => self.increase,
            Control::Decrease => self.decrease,
            Control::Left => self.left,
            Control::Right => self.right,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: Key::Escape,
            increase: Key::ArrowUp,
            decrease: Key::ArrowDown,
            left: Key::ArrowLeft,
            right: Key::ArrowRight,
        }
    }
}

/// Which controls are down this frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ControlSnapshot {
    pub quit: bool,
    down: [bool; 4],
}

impl ControlSnapshot {
    /// Samples the keyboard once for this frame.
    pub fn sample(keyboard: &KeyboardState, bindings: &KeyBindings) -> Self {
        let mut snap = Self {
            quit: keyboard.key_down(bindings.quit),
            down: [false; 4],
        };
        for control in Control::ALL {
            snap.down[control.index()] = keyboard.key_down(bindings.key_for(control));
        }
        snap
    }

    pub fn with_quit(mut self, quit: bool) -> Self {
        self.quit = quit;
        self
    }

    pub fn with(mut self, control: Control, down: bool) -> Self {
        self.down[control.index()] = down;
        self
    }

    pub fn is_down(&self, control: Control) -> bool {
        self.down[control.index()]
    }
}

/// "Was down" flag per control, carried between frames.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct KeyEdges([bool; 4]);

impl KeyEdges {
    pub fn armed(&self, control: Control) -> bool {
        self.0[control.index()]
    }

    /// Records this frame's level; returns true on a press -> release edge.
    fn update(&mut self, control: Control, down: bool) -> bool {
        let slot = &mut self.0[control.index()];
        if down {
            *slot = true;
            return false;
        }
        std::mem::replace(slot, false)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputOutcome {
    Continue,
    Quit,
}

/// Key-edge processor driving the grid size.
#[derive(Debug, Clone)]
pub struct InputState {
    edges: KeyEdges,
    grow_limit: u32,
}

impl InputState {
    /// `grow_limit` is the largest size that may still grow by one.
    pub fn new(grow_limit: u32) -> Self {
        Self {
            edges: KeyEdges::default(),
            grow_limit,
        }
    }

    pub fn edges(&self) -> KeyEdges {
        self.edges
    }

    /// Applies one frame of control state to `size`.
    ///
    /// Increase and decrease are handled independently, so both may commit in
    /// the same frame.
    pub fn process(&mut self, snapshot: &ControlSnapshot, size: &mut GridSize) -> InputOutcome {
        if snapshot.quit {
            return InputOutcome::Quit;
        }

        if snapshot.is_down(Control::Increase) {
            log::trace!("increase held at {size}");
        }
        if self.edges.update(Control::Increase, snapshot.is_down(Control::Increase)) {
            size.grow(self.grow_limit);
        }

        if self.edges.update(Control::Decrease, snapshot.is_down(Control::Decrease)) {
            size.shrink();
        }

        for control in [Control::Left, Control::Right] {
            self.edges.update(control, snapshot.is_down(control));
        }

        InputOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashgrid_engine::input::{InputEvent, KeyState};

    const LIMIT: u32 = 20;

    fn up() -> ControlSnapshot {
        ControlSnapshot::default().with(Control::Increase, true)
    }

    fn down() -> ControlSnapshot {
        ControlSnapshot::default().with(Control::Decrease, true)
    }

    fn idle() -> ControlSnapshot {
        ControlSnapshot::default()
    }

    fn run(input: &mut InputState, size: &mut GridSize, frames: &[ControlSnapshot]) {
        for snap in frames {
            assert_eq!(input.process(snap, size), InputOutcome::Continue);
        }
    }

    // ── release edge ──────────────────────────────────────────────────────

    #[test]
    fn press_without_release_changes_nothing() {
        let mut input = InputState::new(LIMIT);
        let mut size = GridSize::square(1);
        run(&mut input, &mut size, &[up(), up(), up()]);
        assert_eq!(size, GridSize::square(1));
        assert!(input.edges().armed(Control::Increase));
    }

    #[test]
    fn release_commits_once() {
        let mut input = InputState::new(LIMIT);
        let mut size = GridSize::square(1);
        run(&mut input, &mut size, &[up(), up(), idle(), idle()]);
        assert_eq!(size, GridSize::square(2));
        assert!(!input.edges().armed(Control::Increase));
    }

    #[test]
    fn release_without_press_changes_nothing() {
        let mut input = InputState::new(LIMIT);
        let mut size = GridSize::square(3);
        run(&mut input, &mut size, &[idle(), idle()]);
        assert_eq!(size, GridSize::square(3));
    }

    #[test]
    fn decrease_on_release() {
        let mut input = InputState::new(LIMIT);
        let mut size = GridSize::square(3);
        run(&mut input, &mut size, &[down(), idle(), down(), idle()]);
        assert_eq!(size, GridSize::square(1));
    }

    // ── bounds ────────────────────────────────────────────────────────────

    #[test]
    fn increase_never_exceeds_limit_plus_one() {
        let mut input = InputState::new(LIMIT);
        let mut size = GridSize::square(1);
        for _ in 0..40 {
            run(&mut input, &mut size, &[up(), idle()]);
            assert!(size.rows <= LIMIT + 1);
        }
        assert_eq!(size, GridSize::square(21));
    }

    #[test]
    fn decrease_never_goes_below_zero() {
        let mut input = InputState::new(LIMIT);
        let mut size = GridSize::square(2);
        for _ in 0..5 {
            run(&mut input, &mut size, &[down(), idle()]);
        }
        assert_eq!(size, GridSize::square(0));
    }

    #[test]
    fn decrease_from_top_is_unguarded_above() {
        let mut input = InputState::new(LIMIT);
        let mut size = GridSize::square(21);
        run(&mut input, &mut size, &[down(), idle()]);
        assert_eq!(size, GridSize::square(20));
    }

    // ── combinations ──────────────────────────────────────────────────────

    #[test]
    fn simultaneous_release_applies_both() {
        let mut input = InputState::new(LIMIT);
        let mut size = GridSize::square(5);
        let both = up().with(Control::Decrease, true);
        run(&mut input, &mut size, &[both, idle()]);
        assert_eq!(size, GridSize::square(5));
        assert_eq!(input.edges(), KeyEdges::default());
    }

    #[test]
    fn simultaneous_release_at_zero_grows_then_shrinks() {
        let mut input = InputState::new(LIMIT);
        let mut size = GridSize::square(0);
        let both = up().with(Control::Decrease, true);
        run(&mut input, &mut size, &[both, idle()]);
        assert_eq!(size, GridSize::square(0));
    }

    #[test]
    fn reserved_controls_track_edges_only() {
        let mut input = InputState::new(LIMIT);
        let mut size = GridSize::square(4);
        let left = idle().with(Control::Left, true);
        run(&mut input, &mut size, &[left]);
        assert!(input.edges().armed(Control::Left));

        run(&mut input, &mut size, &[idle()]);
        assert!(!input.edges().armed(Control::Left));
        assert_eq!(size, GridSize::square(4));
    }

    // ── quit ──────────────────────────────────────────────────────────────

    #[test]
    fn quit_is_immediate() {
        let mut input = InputState::new(LIMIT);
        let mut size = GridSize::square(1);
        run(&mut input, &mut size, &[up()]);

        let quit = idle().with_quit(true);
        assert_eq!(input.process(&quit, &mut size), InputOutcome::Quit);
        assert_eq!(size, GridSize::square(1));
    }

    // ── sampling ──────────────────────────────────────────────────────────

    #[test]
    fn sample_reads_bound_keys() {
        let mut kb = KeyboardState::default();
        for key in [Key::ArrowUp, Key::Escape] {
            kb.apply_event(&InputEvent::Key { key, state: KeyState::Pressed, repeat: false });
        }

        let snap = ControlSnapshot::sample(&kb, &KeyBindings::default());
        assert!(snap.quit);
        assert!(snap.is_down(Control::Increase));
        assert!(!snap.is_down(Control::Decrease));
        assert!(!snap.is_down(Control::Right));
    }

    #[test]
    fn sample_honours_rebinding() {
        let mut kb = KeyboardState::default();
        kb.apply_event(&InputEvent::Key { key: Key::ArrowRight, state: KeyState::Pressed, repeat: false });

        let bindings = KeyBindings { increase: Key::ArrowRight, ..KeyBindings::default() };
        let snap = ControlSnapshot::sample(&kb, &bindings);
        assert!(snap.is_down(Control::Increase));
        assert!(snap.is_down(Control::Right));
    }
}
