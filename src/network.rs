//! The ambient network: a fixed node set drawn onto one surface.

use glam::Vec2;

use crate::config::NetworkConfig;
use crate::links::{find_links, Links};
use crate::node::{Node, NodeRole};
use crate::spawn::{RandomSource, SpawnContext};
use crate::surface::{GlyphPaint, Shadow, Stroke, Surface};

/// A network of drifting glyph nodes bound to a drawing surface.
///
/// The node set is built once in [`AmbientNetwork::new`] and never grows or
/// shrinks. Each [`frame`](AmbientNetwork::frame) clears the surface, moves
/// every node, strokes links between close pairs and paints the glyphs.
pub struct AmbientNetwork<S: Surface> {
    surface: S,
    config: NetworkConfig,
    nodes: Vec<Node>,
}

impl<S: Surface> AmbientNetwork<S> {
    /// Populate a network over `surface`.
    ///
    /// Mobile nodes are spread uniformly over the surface's current size;
    /// the anchor, if configured, is appended last at the center. The
    /// config is expected to be valid (see [`NetworkConfig::validate`]).
    pub fn new<R: RandomSource + ?Sized>(surface: S, config: NetworkConfig, rng: &mut R) -> Self {
        let bounds = surface.size();
        let mut nodes = Vec::with_capacity(config.total_nodes());

        let mut ctx = SpawnContext::new(bounds, rng);
        for _ in 0..config.node_count {
            nodes.push(Node::spawn(&mut ctx, &config));
        }
        if let Some(anchor) = &config.anchor {
            nodes.push(Node::anchor(anchor, bounds * 0.5));
        }

        log::debug!(
            "ambient network populated: {} nodes on {}x{}",
            nodes.len(),
            bounds.x,
            bounds.y
        );

        Self {
            surface,
            config,
            nodes,
        }
    }

    /// Build a network around an existing node set.
    ///
    /// Used to replay exact layouts. At most one anchor is kept; extra
    /// anchors are demoted to mobile nodes.
    pub fn from_nodes(surface: S, config: NetworkConfig, mut nodes: Vec<Node>) -> Self {
        let mut seen_anchor = false;
        for node in &mut nodes {
            if node.role == NodeRole::Anchor {
                if seen_anchor {
                    node.role = NodeRole::Mobile;
                }
                seen_anchor = true;
            }
        }
        Self {
            surface,
            config,
            nodes,
        }
    }

    /// All nodes. Networks built by `new` list the anchor last.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The anchor node, if any.
    pub fn anchor(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.role == NodeRole::Anchor)
    }

    /// Configuration the network was built with.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The drawing surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Center of the surface.
    pub fn center(&self) -> Vec2 {
        self.surface.size() * 0.5
    }

    /// Resize the surface to a new container size.
    ///
    /// Mobile nodes keep their positions, even when now outside the surface;
    /// the next update pulls them back in. The anchor moves to the new
    /// center right away.
    pub fn resize(&mut self, size: Vec2) {
        self.surface.resize(size);
        let center = self.center();
        for node in self.nodes.iter_mut().filter(|n| !n.is_mobile()) {
            node.position = center;
        }
    }

    /// Move every node one frame.
    pub fn update(&mut self) {
        let bounds = self.surface.size();
        for node in &mut self.nodes {
            node.advance(bounds);
        }
    }

    /// Links between the current node positions.
    pub fn links(&self) -> Links<'_> {
        find_links(&self.nodes, self.config.links.threshold, self.config.links.weight)
    }

    /// Paint the current state without moving anything.
    pub fn render(&mut self) {
        self.surface.clear(self.config.background);
        self.paint();
    }

    /// One complete frame: clear, move, link, paint.
    pub fn frame(&mut self) {
        self.surface.clear(self.config.background);
        self.update();
        self.paint();
    }

    /// Stroke links between close pairs, then draw every glyph with its glow.
    fn paint(&mut self) {
        if self.config.links.enabled {
            let links = &self.config.links;
            for link in find_links(&self.nodes, links.threshold, links.weight) {
                let stroke = Stroke {
                    color: links.color,
                    width: links.width,
                    alpha: link.alpha,
                };
                self.surface.stroke_line(link.from, link.to, &stroke);
            }
        }

        let glow = self.config.glow;
        for node in &self.nodes {
            let paint = GlyphPaint {
                text: &node.glyph,
                font_size: node.font_size,
                font_family: &self.config.font_family,
                color: node.color,
                alpha: node.opacity,
            };
            // Two passes with different blur radii stack into a stronger glow.
            for blur in [glow.inner_blur, glow.outer_blur] {
                self.surface.set_shadow(Shadow {
                    blur,
                    color: node.color,
                });
                self.surface.fill_glyph(node.position, &paint);
            }
            self.surface.set_shadow(Shadow::NONE);
        }
    }
}
