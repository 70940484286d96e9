use crate::{Point3, SensorFrameOutput};
use std::sync::Arc;

type Subscriber = Box<dyn FnMut(&Arc<SensorFrameOutput>)>;

/// The channel a sensor publishes its frame output into. Each publish replaces the latest output
/// with a new immutable snapshot in a single assignment, so a reader holding a snapshot never
/// sees a mix of two frames. Subscribers are handed the new snapshot in the order they were
/// registered.
pub struct FrameSink {
    latest: Arc<SensorFrameOutput>,
    subscribers: Vec<Subscriber>,
    published: u64,
}

impl Default for FrameSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink {
    pub fn new() -> Self {
        Self {
            latest: Arc::new(SensorFrameOutput::default()),
            subscribers: Vec::new(),
            published: 0,
        }
    }

    /// Register a consumer to be called with every published frame
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&Arc<SensorFrameOutput>) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn publish(&mut self, output: SensorFrameOutput) {
        self.latest = Arc::new(output);
        self.published += 1;
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&self.latest);
        }
    }

    /// A snapshot of the latest output, which stays valid after later publishes
    pub fn latest(&self) -> Arc<SensorFrameOutput> {
        Arc::clone(&self.latest)
    }

    pub fn hit_points(&self) -> &[Point3] {
        self.latest.hit_points()
    }

    pub fn hit_count(&self) -> usize {
        self.latest.hit_count()
    }

    /// The number of frames published so far
    pub fn published(&self) -> u64 {
        self.published
    }
}
