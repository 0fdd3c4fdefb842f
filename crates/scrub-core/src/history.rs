//! Versioned annotation collection
//!
//! Holds the finalized annotation sequence (insertion order is z-order,
//! painted in order) plus two bounded stacks of whole-sequence snapshots.
//! Every mutation that is not itself an undo/redo pushes the pre-mutation
//! snapshot onto the undo stack and clears the redo stack. Whole-snapshot
//! semantics are deliberate: at hundreds of annotations the copies are
//! cheap and the invariants stay simple.

use tracing::debug;

use crate::annotation::{Annotation, AnnotationPatch};
use crate::error::{Error, Result};

/// Maximum number of restorable undo steps; oldest snapshots are evicted
/// first.
pub const MAX_UNDO_DEPTH: usize = 50;

#[derive(Debug, Clone)]
pub struct AnnotationHistory {
    annotations: Vec<Annotation>,
    undo_stack: Vec<Vec<Annotation>>,
    redo_stack: Vec<Vec<Annotation>>,
    max_undo_depth: usize,
}

impl Default for AnnotationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationHistory {
    pub fn new() -> Self {
        Self::with_depth(MAX_UNDO_DEPTH)
    }

    pub fn with_depth(max_undo_depth: usize) -> Self {
        Self {
            annotations: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo_depth,
        }
    }

    /// The finalized annotations, oldest first (bottom of the z-order).
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn get(&self, id: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Record the pre-mutation state. Called by every mutation that is not
    /// an undo/redo; clears the redo stack and enforces the depth bound.
    fn checkpoint(&mut self) {
        self.redo_stack.clear();
        self.undo_stack.push(self.annotations.clone());
        if self.undo_stack.len() > self.max_undo_depth {
            self.undo_stack.remove(0);
        }
    }

    /// Append an annotation at the top of the z-order.
    pub fn add(&mut self, annotation: Annotation) {
        self.checkpoint();
        debug!(id = %annotation.id, kind = annotation.shape.kind(), "add annotation");
        self.annotations.push(annotation);
    }

    /// Merge a patch into the annotation with the given id.
    ///
    /// Returns `Ok(true)` if an annotation was patched, `Ok(false)` if no
    /// annotation carries the id (the snapshot is still recorded, matching
    /// the add/remove bookkeeping). A patch whose shape variant differs
    /// from the stored one is rejected without touching the history.
    pub fn update(&mut self, id: &str, patch: AnnotationPatch) -> Result<bool> {
        if let Some(current) = self.get(id) {
            if let Some(shape) = &patch.shape {
                if !current.shape.same_kind(shape) {
                    return Err(Error::ShapeKindMismatch {
                        id: id.to_string(),
                        actual: current.shape.kind(),
                        patched: shape.kind(),
                    });
                }
            }
        }

        self.checkpoint();

        let Some(annotation) = self.annotations.iter_mut().find(|a| a.id == id) else {
            debug!(id, "update on missing annotation");
            return Ok(false);
        };

        if let Some(color) = patch.color {
            annotation.color = color;
        }
        if let Some(thickness) = patch.thickness {
            annotation.thickness = thickness;
        }
        if let Some(shape) = patch.shape {
            annotation.shape = shape;
        }
        Ok(true)
    }

    /// Remove the annotation with the given id.
    ///
    /// Returns whether an annotation was removed; a miss still records the
    /// snapshot.
    pub fn remove(&mut self, id: &str) -> bool {
        self.checkpoint();
        let before = self.annotations.len();
        self.annotations.retain(|a| a.id != id);
        let removed = self.annotations.len() != before;
        if !removed {
            debug!(id, "remove on missing annotation");
        }
        removed
    }

    /// Restore the most recent snapshot. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.annotations, previous);
        self.redo_stack.push(current);
        debug!(depth = self.undo_stack.len(), "undo");
        true
    }

    /// Inverse of [`undo`](Self::undo). Returns false when there is nothing
    /// to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.annotations, next);
        self.undo_stack.push(current);
        debug!(depth = self.redo_stack.len(), "redo");
        true
    }

    /// Empty the sequence. No-op (no snapshot) when already empty.
    pub fn clear(&mut self) {
        if self.annotations.is_empty() {
            return;
        }
        self.checkpoint();
        debug!(count = self.annotations.len(), "clear annotations");
        self.annotations.clear();
    }

    /// Replace the whole sequence as one history step. Used by template
    /// application so a single undo reverts the entire template.
    pub fn replace_all(&mut self, annotations: Vec<Annotation>) {
        self.checkpoint();
        debug!(count = annotations.len(), "replace all annotations");
        self.annotations = annotations;
    }

    /// Serialize the finalized sequence as JSON. The undo/redo stacks are
    /// session state and are not persisted.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.annotations)?)
    }

    /// Rebuild a history from a serialized sequence. The restored history
    /// starts with empty undo/redo stacks.
    pub fn from_json(json: &str) -> Result<Self> {
        let annotations: Vec<Annotation> = serde_json::from_str(json)?;
        let mut history = Self::new();
        history.annotations = annotations;
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Shape;
    use crate::geometry::Point;
    use crate::mint::{Mint, SequenceMint};
    use time::macros::datetime;

    fn mint() -> SequenceMint {
        SequenceMint::new("ann", datetime!(2026-01-01 00:00 UTC))
    }

    fn rect(mint: &mut dyn Mint, x: f64) -> Annotation {
        Annotation::new(
            mint,
            "#FF0000",
            3,
            Shape::Rectangle {
                origin: Point::new(x, 0.0),
                width: 10.0,
                height: 10.0,
            },
        )
    }

    fn ids(history: &AnnotationHistory) -> Vec<&str> {
        history.annotations().iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_add_undo_redo_cycle() {
        let mut mint = mint();
        let mut history = AnnotationHistory::new();
        history.add(rect(&mut mint, 0.0));
        history.add(rect(&mut mint, 10.0));
        assert_eq!(ids(&history), vec!["ann-1", "ann-2"]);

        assert!(history.undo());
        assert_eq!(ids(&history), vec!["ann-1"]);
        assert!(history.undo());
        assert!(history.is_empty());
        assert!(!history.undo());

        assert!(history.redo());
        assert_eq!(ids(&history), vec!["ann-1"]);

        // A new mutation invalidates the remaining redo state.
        history.add(rect(&mut mint, 20.0));
        assert!(!history.can_redo());
        assert!(!history.redo());
    }

    #[test]
    fn test_undo_depth_bound() {
        let mut mint = mint();
        let mut history = AnnotationHistory::new();
        for i in 0..60 {
            history.add(rect(&mut mint, i as f64));
        }

        let mut undone = 0;
        while history.undo() {
            undone += 1;
        }
        assert_eq!(undone, MAX_UNDO_DEPTH);
        // Oldest snapshots were evicted: 10 annotations are not restorable.
        assert_eq!(history.len(), 10);
    }

    #[test]
    fn test_update_merges_fields_within_variant() {
        let mut mint = mint();
        let mut history = AnnotationHistory::new();
        history.add(rect(&mut mint, 0.0));

        let patched = history
            .update(
                "ann-1",
                AnnotationPatch::default().color("#00FF00").shape(Shape::Rectangle {
                    origin: Point::new(5.0, 5.0),
                    width: 20.0,
                    height: 20.0,
                }),
            )
            .unwrap();
        assert!(patched);

        let ann = history.get("ann-1").unwrap();
        assert_eq!(ann.color, "#00FF00");
        assert_eq!(ann.thickness, 3);
        assert!(matches!(ann.shape, Shape::Rectangle { width, .. } if width == 20.0));

        // The update is one undoable step.
        assert!(history.undo());
        assert_eq!(history.get("ann-1").unwrap().color, "#FF0000");
    }

    #[test]
    fn test_update_rejects_variant_change() {
        let mut mint = mint();
        let mut history = AnnotationHistory::new();
        history.add(rect(&mut mint, 0.0));
        let undo_before = history.can_undo();

        let err = history
            .update(
                "ann-1",
                AnnotationPatch::default().shape(Shape::Freehand {
                    points: vec![Point::new(0.0, 0.0)],
                }),
            )
            .unwrap_err();
        assert!(matches!(err, Error::ShapeKindMismatch { .. }));

        // Rejected before any snapshot: history unchanged.
        assert_eq!(history.can_undo(), undo_before);
        assert!(matches!(
            history.get("ann-1").unwrap().shape,
            Shape::Rectangle { .. }
        ));
    }

    #[test]
    fn test_update_missing_id_still_snapshots() {
        let mut mint = mint();
        let mut history = AnnotationHistory::new();
        history.add(rect(&mut mint, 0.0));
        history.undo();
        assert!(history.can_redo());

        let patched = history
            .update("no-such-id", AnnotationPatch::default().color("#000000"))
            .unwrap();
        assert!(!patched);
        // The no-op still consumed a history step and cleared redo.
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_remove() {
        let mut mint = mint();
        let mut history = AnnotationHistory::new();
        history.add(rect(&mut mint, 0.0));
        history.add(rect(&mut mint, 10.0));

        assert!(history.remove("ann-1"));
        assert_eq!(ids(&history), vec!["ann-2"]);
        assert!(!history.remove("ann-1"));

        assert!(history.undo());
        assert_eq!(ids(&history), vec!["ann-2"]);
        assert!(history.undo());
        assert_eq!(ids(&history), vec!["ann-1", "ann-2"]);
    }

    #[test]
    fn test_clear_is_noop_when_empty() {
        let mut history = AnnotationHistory::new();
        history.clear();
        assert!(!history.can_undo());

        let mut mint = mint();
        history.add(rect(&mut mint, 0.0));
        history.clear();
        assert!(history.is_empty());
        assert!(history.undo());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_with_depth_bounds_undo() {
        let mut mint = mint();
        let mut history = AnnotationHistory::with_depth(2);
        for i in 0..5 {
            history.add(rect(&mut mint, i as f64));
        }

        let mut undone = 0;
        while history.undo() {
            undone += 1;
        }
        assert_eq!(undone, 2);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_json_round_trip_persists_sequence_only() {
        let mut mint = mint();
        let mut history = AnnotationHistory::new();
        history.add(rect(&mut mint, 0.0));
        history.add(rect(&mut mint, 10.0));
        history.undo();
        history.redo();

        let json = history.to_json().unwrap();
        let restored = AnnotationHistory::from_json(&json).unwrap();
        assert_eq!(restored.annotations(), history.annotations());
        // Stacks are session state; a restored history has none.
        assert!(!restored.can_undo());
        assert!(!restored.can_redo());
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let err = AnnotationHistory::from_json("not an annotation list").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_replace_all_is_single_step() {
        let mut mint = mint();
        let mut history = AnnotationHistory::new();
        history.add(rect(&mut mint, 0.0));

        let replacement = vec![rect(&mut mint, 1.0), rect(&mut mint, 2.0), rect(&mut mint, 3.0)];
        history.replace_all(replacement);
        assert_eq!(history.len(), 3);

        // One undo reverts the whole replacement.
        assert!(history.undo());
        assert_eq!(ids(&history), vec!["ann-1"]);
    }
}
