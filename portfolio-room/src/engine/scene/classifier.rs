use super::scene_graph::{NodeId, SceneGraph};
use bevy::prelude::*;
use constants::classifier::*;

/// Thresholds and weights for picking the computer out of the room model.
#[derive(Resource, Debug, Clone)]
pub struct ClassifierConfig {
    pub table_height: (f32, f32),
    pub ideal_height: (f32, f32),
    pub fallback_height: (f32, f32),
    pub screen_aspect_ratio: f32,
    pub screen_min_extent: f32,
    pub panel_min_extent: f32,
    pub panel_max_thickness: f32,
    pub large_extent: f32,
    pub name_match_score: u32,
    pub screen_like_score: u32,
    pub ideal_height_score: u32,
    pub large_extent_score: u32,
    pub keywords: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            table_height: (TABLE_HEIGHT_MIN, TABLE_HEIGHT_MAX),
            ideal_height: (IDEAL_HEIGHT_MIN, IDEAL_HEIGHT_MAX),
            fallback_height: (FALLBACK_HEIGHT_MIN, FALLBACK_HEIGHT_MAX),
            screen_aspect_ratio: SCREEN_ASPECT_RATIO,
            screen_min_extent: SCREEN_MIN_EXTENT,
            panel_min_extent: PANEL_MIN_EXTENT,
            panel_max_thickness: PANEL_MAX_THICKNESS,
            large_extent: LARGE_EXTENT,
            name_match_score: NAME_MATCH_SCORE,
            screen_like_score: SCREEN_LIKE_SCORE,
            ideal_height_score: IDEAL_HEIGHT_SCORE,
            large_extent_score: LARGE_EXTENT_SCORE,
            keywords: NAME_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Scored mesh that passed the strict rule.
#[derive(Debug, Clone, Copy)]
pub struct CandidateScore {
    pub node: NodeId,
    pub score: u32,
    pub center: Vec3,
    pub size: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// Best scoring candidate under the strict rule.
    Scored { node: NodeId, score: u32 },
    /// First mesh inside the relaxed height band.
    Fallback { node: NodeId },
}

impl Selection {
    pub fn node(&self) -> NodeId {
        match *self {
            Selection::Scored { node, .. } | Selection::Fallback { node } => node,
        }
    }
}

fn within(value: f32, (min, max): (f32, f32)) -> bool {
    value > min && value < max
}

impl ClassifierConfig {
    pub fn is_table_height(&self, center: Vec3) -> bool {
        within(center.y, self.table_height)
    }

    /// Wide and low, deep and low, or a panel lying flat (both horizontal
    /// extents large, vertical extent thin).
    pub fn is_screen_like(&self, size: Vec3) -> bool {
        let wide = size.x > size.y * self.screen_aspect_ratio && size.x > self.screen_min_extent;
        let deep = size.z > size.y * self.screen_aspect_ratio && size.z > self.screen_min_extent;
        let flat_panel = size.x > self.panel_min_extent
            && size.z > self.panel_min_extent
            && size.y < self.panel_max_thickness;

        wide || deep || flat_panel
    }

    pub fn is_name_match(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    /// Score a mesh, or None when it fails the strict rule.
    pub fn score(&self, node: NodeId, name: &str, center: Vec3, size: Vec3) -> Option<CandidateScore> {
        if !self.is_table_height(center) {
            return None;
        }
        let name_match = self.is_name_match(name);
        let screen_like = self.is_screen_like(size);
        if !(name_match || screen_like) {
            return None;
        }

        let mut score = 0;
        if name_match {
            score += self.name_match_score;
        }
        if screen_like {
            score += self.screen_like_score;
        }
        if within(center.y, self.ideal_height) {
            score += self.ideal_height_score;
        }
        if size.x > self.large_extent || size.z > self.large_extent {
            score += self.large_extent_score;
        }

        Some(CandidateScore {
            node,
            score,
            center,
            size,
        })
    }
}

/// Every mesh passing the strict rule, in discovery order.
pub fn score_candidates(graph: &SceneGraph, config: &ClassifierConfig) -> Vec<CandidateScore> {
    graph
        .meshes()
        .filter_map(|(id, node)| {
            let bounds = node.bounds?;
            config.score(id, &node.name, bounds.center(), bounds.size())
        })
        .collect()
}

/// Pick the interactive object. Highest score wins; ties keep the earliest.
pub fn classify(graph: &SceneGraph, config: &ClassifierConfig) -> Option<Selection> {
    let candidates = score_candidates(graph, config);

    let mut best: Option<CandidateScore> = None;
    for candidate in candidates {
        debug!(
            "Candidate {:?} score={} center={:?} size={:?}",
            candidate.node, candidate.score, candidate.center, candidate.size
        );
        if best.is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }

    if let Some(best) = best {
        return Some(Selection::Scored {
            node: best.node,
            score: best.score,
        });
    }

    graph
        .meshes()
        .find(|(_, node)| {
            node.bounds
                .is_some_and(|b| within(b.center().y, config.fallback_height))
        })
        .map(|(node, _)| Selection::Fallback { node })
}

/// Classify and tag the result on the graph.
pub fn classify_and_tag(graph: &mut SceneGraph, config: &ClassifierConfig) -> Option<Selection> {
    let selection = classify(graph, config)?;
    if graph.tag_interactive(selection.node()) {
        Some(selection)
    } else {
        None
    }
}
