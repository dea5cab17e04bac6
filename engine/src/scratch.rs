use std::collections::VecDeque;

use crate::{prelude::*, ActiveTileSet, Config, Overflow};

/// Working buffers shared by the recomputation passes.
///
/// Nothing is kept here between passes, every pass leaves the buffers
/// empty.
#[derive(Clone, Debug)]
pub(crate) struct Scratch {
    pub(crate) temp: ActiveTileSet,
    pub(crate) queue: FlowQueue,
}

impl Scratch {
    pub fn new(config: &Config) -> Self {
        Scratch {
            // Staging a set must never drop tiles, or they'd go missing from
            // the diff.
            temp: ActiveTileSet::new(
                "temp",
                config
                    .temp_capacity
                    .max(config.view_capacity)
                    .max(config.lite_capacity)
                    .max(config.monster_lite_capacity),
                config.overflow,
            ),
            queue: FlowQueue::new(config.temp_capacity, config.overflow),
        }
    }
}

/// Bounded FIFO for breadth-first propagation.
#[derive(Clone, Debug)]
pub(crate) struct FlowQueue {
    queue: VecDeque<IVec2>,
    capacity: usize,
    overflow: Overflow,
    dropped: usize,
}

impl FlowQueue {
    pub fn new(capacity: usize, overflow: Overflow) -> Self {
        FlowQueue {
            queue: VecDeque::with_capacity(capacity),
            capacity,
            overflow,
            dropped: 0,
        }
    }

    pub fn reset(&mut self) {
        self.queue.clear();
        self.dropped = 0;
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn push(&mut self, p: IVec2) -> bool {
        if self.queue.len() >= self.capacity
            && self.overflow == Overflow::Truncate
        {
            if self.dropped == 0 {
                log::warn!(
                    "flow queue is full at {} tiles, flow will be truncated",
                    self.capacity
                );
            }
            self.dropped += 1;
            return false;
        }
        self.queue.push_back(p);
        true
    }

    pub fn pop(&mut self) -> Option<IVec2> {
        self.queue.pop_front()
    }
}
