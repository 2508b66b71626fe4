//! Pointer-driven pick editing.
//!
//! [`PickInteraction`] is a two-state machine (`Idle`, `Dragging`) that turns
//! normalised pointer events into mutations of a [`PickSet`]. It owns only
//! the drag and hover references; the point set and the coordinate mapper
//! are lent to it per event.

use log::debug;
use seispick_core::{CoordinateMapper, PickPoint, PickSet, ScreenPoint};

/// A pointer event reduced to what the state machine needs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerInput {
    /// Viewport X in pixels.
    pub x: f64,
    /// Viewport Y in pixels.
    pub y: f64,
    /// Add modifier held (shift).
    pub modifier_add: bool,
    /// Remove modifier held (alt).
    pub modifier_remove: bool,
}

impl PointerInput {
    /// An unmodified event at `(x, y)`.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_add(mut self) -> Self {
        self.modifier_add = true;
        self
    }

    #[must_use]
    pub fn with_remove(mut self) -> Self {
        self.modifier_remove = true;
        self
    }

    pub fn position(&self) -> ScreenPoint {
        ScreenPoint::new(self.x, self.y)
    }
}

/// Interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Dragging the point currently at this location.
    Dragging(PickPoint),
}

/// What a pointer event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// Nothing changed.
    Ignored,
    /// A new point was appended.
    Added(PickPoint),
    /// Every point at this location was removed.
    Removed { point: PickPoint, count: usize },
    /// A drag began on this point.
    DragStarted(PickPoint),
    /// The dragged point moved.
    Moved { from: PickPoint, to: PickPoint },
    /// The hovered point changed.
    HoverChanged(Option<PickPoint>),
    /// A drag ended.
    DragEnded,
}

impl PointerOutcome {
    /// Whether the point set was mutated.
    pub fn changed_points(&self) -> bool {
        matches!(
            self,
            PointerOutcome::Added(_) | PointerOutcome::Removed { .. } | PointerOutcome::Moved { .. }
        )
    }
}

/// Index of the first point whose screen projection lies strictly closer
/// than `radius` pixels to `at`.
pub fn hit_test(
    points: &PickSet,
    mapper: &CoordinateMapper<'_>,
    at: ScreenPoint,
    radius: f64,
) -> Option<usize> {
    points
        .iter()
        .position(|p| mapper.to_screen(p.frequency, p.slowness).distance(&at) < radius)
}

/// Pick editing state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct PickInteraction {
    state: InteractionState,
    hovered: Option<PickPoint>,
    hit_radius: f64,
}

impl Default for PickInteraction {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl PickInteraction {
    pub fn new(hit_radius: f64) -> Self {
        Self {
            state: InteractionState::Idle,
            hovered: None,
            hit_radius,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging(_))
    }

    pub fn dragged(&self) -> Option<PickPoint> {
        match self.state {
            InteractionState::Dragging(p) => Some(p),
            InteractionState::Idle => None,
        }
    }

    pub fn hovered(&self) -> Option<PickPoint> {
        self.hovered
    }

    pub fn hit_radius(&self) -> f64 {
        self.hit_radius
    }

    /// Label for the dragged point, else the hovered one.
    pub fn tooltip(&self) -> Option<String> {
        self.dragged().or(self.hovered).map(|p| p.label())
    }

    /// Returns to `Idle` and forgets the hover.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.hovered = None;
    }

    /// Handles a pointer press.
    ///
    /// With the add modifier a point is always appended at the mapped
    /// position. Otherwise the first hit point is removed (remove modifier)
    /// or starts a drag.
    pub fn pointer_down(
        &mut self,
        points: &mut PickSet,
        mapper: &CoordinateMapper<'_>,
        input: PointerInput,
    ) -> PointerOutcome {
        if self.is_dragging() {
            // Missed release; finish the old drag first.
            self.state = InteractionState::Idle;
        }

        if input.modifier_add {
            let (frequency, slowness) = mapper.from_screen(input.position());
            let point = PickPoint::new(frequency, slowness);
            points.add(point);
            debug!("added pick {}", point.label());
            return PointerOutcome::Added(point);
        }

        let Some(index) = hit_test(points, mapper, input.position(), self.hit_radius) else {
            return PointerOutcome::Ignored;
        };
        let Some(&point) = points.get(index) else {
            return PointerOutcome::Ignored;
        };

        if input.modifier_remove {
            let count = points.remove_matching(&point);
            if self.hovered.is_some_and(|h| h.same_location(&point)) {
                self.hovered = None;
            }
            debug!("removed {count} pick(s) at {}", point.label());
            PointerOutcome::Removed { point, count }
        } else {
            // The dragged point leaves the set on the first move.
            self.hovered = None;
            self.state = InteractionState::Dragging(point);
            debug!("drag started on {}", point.label());
            PointerOutcome::DragStarted(point)
        }
    }

    /// Handles pointer motion: moves the dragged point, or updates hover.
    ///
    /// A moved point keeps its auxiliary fields and goes to the end of the
    /// set.
    pub fn pointer_move(
        &mut self,
        points: &mut PickSet,
        mapper: &CoordinateMapper<'_>,
        input: PointerInput,
    ) -> PointerOutcome {
        if let InteractionState::Dragging(from) = self.state {
            let (frequency, slowness) = mapper.from_screen(input.position());
            let to = PickPoint {
                frequency,
                slowness,
                ..from
            };
            points.remove_matching(&from);
            points.add(to);
            self.state = InteractionState::Dragging(to);
            return PointerOutcome::Moved { from, to };
        }

        let hovered = hit_test(points, mapper, input.position(), self.hit_radius)
            .and_then(|i| points.get(i).copied());
        if hovered == self.hovered {
            return PointerOutcome::Ignored;
        }
        self.hovered = hovered;
        PointerOutcome::HoverChanged(hovered)
    }

    /// Handles a pointer release.
    pub fn pointer_up(&mut self) -> PointerOutcome {
        match self.state {
            InteractionState::Dragging(p) => {
                debug!("drag ended at {}", p.label());
                self.state = InteractionState::Idle;
                PointerOutcome::DragEnded
            }
            InteractionState::Idle => PointerOutcome::Ignored,
        }
    }
}
