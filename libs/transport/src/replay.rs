//! In-process replay source
//!
//! Stands in for a live publisher: yields a fixed sequence of raw messages,
//! then reports end of stream. Lets the consumer loop be exercised without a
//! network endpoint.

use crate::error::Result;
use crate::Subscription;
use async_trait::async_trait;
use std::collections::VecDeque;

/// A [`Subscription`] that replays a pre-recorded message sequence
#[derive(Debug, Default)]
pub struct ReplaySource {
    messages: VecDeque<Vec<u8>>,
}

impl ReplaySource {
    pub fn new<I>(messages: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        Self {
            messages: messages.into_iter().collect(),
        }
    }

    /// Messages still queued for delivery.
    pub fn remaining(&self) -> usize {
        self.messages.len()
    }
}

#[async_trait]
impl Subscription for ReplaySource {
    async fn receive(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.messages.pop_front())
    }
}
