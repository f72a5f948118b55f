//! Proximity links between nodes.
//!
//! Every unordered pair closer than the threshold gets a line whose alpha
//! fades linearly from `weight` at zero distance to nothing at the
//! threshold. The scan is a plain O(n²) pair loop: the network holds a few
//! dozen nodes, well below where a spatial grid pays for itself.

use glam::Vec2;

use crate::node::Node;

/// A line between two nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Index of the first node (always the lower index).
    pub a: usize,
    /// Index of the second node.
    pub b: usize,
    /// Start point.
    pub from: Vec2,
    /// End point.
    pub to: Vec2,
    /// Distance between the endpoints.
    pub distance: f32,
    /// Stroke alpha.
    pub alpha: f32,
}

/// Alpha of a link spanning `distance`, or `None` when too long to draw.
#[inline]
pub fn link_alpha(distance: f32, threshold: f32, weight: f32) -> Option<f32> {
    if distance < threshold {
        Some((1.0 - distance / threshold) * weight)
    } else {
        None
    }
}

/// Iterate over every link among `nodes`.
pub fn find_links(nodes: &[Node], threshold: f32, weight: f32) -> Links<'_> {
    Links {
        nodes,
        threshold,
        weight,
        i: 0,
        j: 1,
    }
}

/// Iterator returned by [`find_links`].
#[derive(Debug, Clone)]
pub struct Links<'a> {
    nodes: &'a [Node],
    threshold: f32,
    weight: f32,
    i: usize,
    j: usize,
}

impl Iterator for Links<'_> {
    type Item = Link;

    fn next(&mut self) -> Option<Link> {
        while self.i < self.nodes.len() {
            while self.j < self.nodes.len() {
                let (a, b) = (self.i, self.j);
                self.j += 1;

                let from = self.nodes[a].position;
                let to = self.nodes[b].position;
                let distance = from.distance(to);
                if let Some(alpha) = link_alpha(distance, self.threshold, self.weight) {
                    return Some(Link {
                        a,
                        b,
                        from,
                        to,
                        distance,
                        alpha,
                    });
                }
            }
            self.i += 1;
            self.j = self.i + 1;
        }
        None
    }
}
