// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-channel cast tally and the most-active-channel result.

use super::cast::{Cast, Channel};
use serde::Serialize;
use std::collections::HashMap;

/// Aggregate for one channel. `image_url` and `name` come from the first
/// cast seen in that channel and are never overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelStats {
    pub count: u32,
    pub image_url: String,
    pub name: String,
}

/// Channel id -> stats, remembering first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ChannelActivity {
    entries: Vec<(String, ChannelStats)>,
    index: HashMap<String, usize>,
}

impl ChannelActivity {
    /// Tally every cast that names a channel, in feed order.
    pub fn from_casts(casts: &[Cast]) -> Self {
        let mut activity = Self::default();
        for channel in casts.iter().filter_map(|cast| cast.channel.as_ref()) {
            activity.record(channel);
        }
        activity
    }

    /// Count one cast in `channel`. Channels without an id are ignored.
    pub fn record(&mut self, channel: &Channel) {
        if channel.id.is_empty() {
            return;
        }

        if let Some(&i) = self.index.get(&channel.id) {
            self.entries[i].1.count += 1;
            return;
        }

        self.index.insert(channel.id.clone(), self.entries.len());
        self.entries.push((
            channel.id.clone(),
            ChannelStats {
                count: 1,
                image_url: channel.image_url().to_string(),
                name: channel.name.clone(),
            },
        ));
    }

    pub fn get(&self, channel_id: &str) -> Option<&ChannelStats> {
        self.index.get(channel_id).map(|&i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChannelStats)> {
        self.entries.iter().map(|(id, stats)| (id.as_str(), stats))
    }

    /// Channel with the highest count. On a tie the channel seen first wins.
    pub fn most_active(&self) -> Option<(&str, &ChannelStats)> {
        let mut best: Option<(&str, &ChannelStats)> = None;
        for (id, stats) in self.iter() {
            match best {
                Some((_, top)) if stats.count <= top.count => {}
                _ => best = Some((id, stats)),
            }
        }
        best
    }
}

/// Result of resolving an address to its most active channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MostActiveChannelImage {
    /// Channel artwork URL; empty when the channel has no image
    pub channel_image_url: String,
    /// Address as supplied by the caller
    pub address: String,
    pub channel_name: Option<String>,
}

impl MostActiveChannelImage {
    pub fn from_stats(address: &str, stats: &ChannelStats) -> Self {
        Self {
            channel_image_url: stats.image_url.clone(),
            address: address.to_string(),
            channel_name: Some(stats.name.clone()).filter(|name| !name.is_empty()),
        }
    }
}
