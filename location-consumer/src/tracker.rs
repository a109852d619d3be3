use std::collections::HashMap;

use gatewatch_core::{Coordinate, DataMessage, DriverKey, DriverRecord};

/// Number of interpolation steps between two reported positions.
pub const ANIMATION_FRAMES: u32 = 30;

/// Movements shorter than this (combined lat/lng units) snap directly to the
/// target instead of animating.
pub const SNAP_DISTANCE: f64 = 1e-5;

/// An in-flight marker movement. Interpolates from the previously reported
/// position, not the currently displayed one, so a fast follow-up update
/// restarts from the last received point.
#[derive(Debug, Clone)]
struct Animation {
    from: Coordinate,
    to: Coordinate,
    frame: u32,
}

impl Animation {
    fn new(from: Coordinate, to: Coordinate) -> Animation {
        Animation { from, to, frame: 0 }
    }

    /// Advances one frame and returns the coordinate to display, or `None`
    /// once the target has been reached.
    fn advance(&mut self) -> Option<Coordinate> {
        if self.is_finished() {
            return None;
        }
        self.frame += 1;
        // The final frame lands exactly on the target.
        if self.frame == ANIMATION_FRAMES {
            return Some(self.to);
        }
        let progress = f64::from(self.frame) / f64::from(ANIMATION_FRAMES);
        Some(self.from.lerp(&self.to, progress))
    }

    fn is_finished(&self) -> bool {
        self.frame >= ANIMATION_FRAMES
    }
}

/// Client-side cache of driver state keyed by driver identity.
///
/// All maps are owned by the tracker instance and only ever handed out by
/// reference, so independent tracker instances are fully isolated. Mutation
/// happens exclusively through [`DriverTracker::apply`] and
/// [`DriverTracker::tick`], both invoked from the single task owning the
/// tracker.
#[derive(Debug, Default)]
pub struct DriverTracker {
    records: HashMap<DriverKey, DriverRecord>,
    last_positions: HashMap<DriverKey, Coordinate>,
    displayed: HashMap<DriverKey, Coordinate>,
    animations: HashMap<DriverKey, Animation>,
}

impl DriverTracker {
    pub fn new() -> DriverTracker {
        Default::default()
    }

    /// Reconciles one feed message against the cache. A record that fails the
    /// visibility filter removes its identity entirely, animation included.
    pub fn apply(&mut self, message: DataMessage) {
        for record in message.positions {
            let key = record.key();
            if record.is_visible() {
                self.upsert(key, record);
            } else {
                self.remove(&key);
            }
        }
    }

    fn upsert(&mut self, key: DriverKey, record: DriverRecord) {
        let new_position = record.position;
        // Unseen drivers appear in place, without an animation.
        let old_position = self
            .last_positions
            .get(&key)
            .copied()
            .unwrap_or(new_position);

        // The authoritative position is stored before the animation starts so
        // a fast follow-up update interpolates from the last received point.
        self.last_positions.insert(key.clone(), new_position);
        self.records.insert(key.clone(), record);

        if old_position.planar_distance_to(&new_position) < SNAP_DISTANCE {
            self.animations.remove(&key);
            self.displayed.insert(key, new_position);
        } else {
            self.animations
                .insert(key, Animation::new(old_position, new_position));
        }
    }

    fn remove(&mut self, key: &DriverKey) {
        self.records.remove(key);
        self.last_positions.remove(key);
        self.displayed.remove(key);
        self.animations.remove(key);
    }

    /// Advances every active animation one frame. Animations for other
    /// identities are untouched by updates arriving in between ticks.
    pub fn tick(&mut self) {
        let mut finished = Vec::new();

        for (key, animation) in &mut self.animations {
            if let Some(position) = animation.advance() {
                self.displayed.insert(key.clone(), position);
            }
            if animation.is_finished() {
                finished.push(key.clone());
            }
        }

        for key in finished {
            self.animations.remove(&key);
        }
    }

    pub fn has_active_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Currently visible drivers, in no particular order.
    pub fn visible_drivers(&self) -> impl Iterator<Item = &DriverRecord> {
        self.records.values()
    }

    /// The coordinate a marker should be drawn at: the animated coordinate
    /// when one exists, the last reported one otherwise.
    pub fn displayed_position(&self, key: &DriverKey) -> Option<Coordinate> {
        self.displayed
            .get(key)
            .or_else(|| self.last_positions.get(key))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
