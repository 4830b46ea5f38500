//! Bounded trail of recent poses for rendering.

use std::collections::VecDeque;

use bevy_math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSample {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

/// FIFO ring of the most recent poses, oldest first.
///
/// Appending past capacity drops the oldest entry, so after `n > capacity`
/// appends the front is the pose appended at zero-based index `n - capacity`.
#[derive(Debug, Clone)]
pub struct History {
    capacity: usize,
    samples: VecDeque<PoseSample>,
}

impl History {
    /// Capacity is clamped to at least one entry.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity.min(4096) + 1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn push(&mut self, sample: PoseSample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &PoseSample> + '_ {
        self.samples.iter()
    }

    /// Trail positions, oldest to newest.
    pub fn positions(&self) -> Vec<Vec3> {
        self.samples.iter().map(|s| s.position).collect()
    }
}
