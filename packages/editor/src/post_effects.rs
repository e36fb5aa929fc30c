//! # Post-Effect System
//!
//! Applied mutations can leave the panel state pointing at something that
//! is gone or no longer on screen. Post-effects look at the forest before
//! and after an edit and decide what the selection has to give up.
//!
//! Post-effects are:
//! - **Deterministic**: the same edit over the same forests yields the same effects
//! - **Read-only**: they never touch the forest, only the selection
//! - **Composable**: every registered effect runs; duplicates are harmless

use crate::mutations::Mutation;
use crate::forest;
use crate::selection::Selection;
use sitecraft_model::WebsiteData;

/// What a post-effect asks of the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEffect {
    /// Drop the selected node, leave the tab settings panel alone
    Deselect,
}

/// What changed. `mutation` is `None` for undo, redo and template loads.
#[derive(Debug, Clone, Copy)]
pub struct EffectContext<'a> {
    pub mutation: Option<&'a Mutation>,
    pub before: &'a WebsiteData,
    pub after: &'a WebsiteData,
    pub selection: &'a Selection,
}

/// Post-effect that can be triggered by a forest change
pub trait PostEffect: std::fmt::Debug {
    fn analyze(&self, ctx: &EffectContext<'_>) -> Vec<SelectionEffect>;
}

/// Removing a component clears the selection
#[derive(Debug)]
pub struct ClearSelectionOnRemove;

impl PostEffect for ClearSelectionOnRemove {
    fn analyze(&self, ctx: &EffectContext<'_>) -> Vec<SelectionEffect> {
        match ctx.mutation {
            Some(Mutation::RemoveComponent { .. }) if ctx.selection.selected().is_some() => {
                vec![SelectionEffect::Deselect]
            }
            _ => vec![],
        }
    }
}

/// Activating a tab clears the selection, even when it was already active
#[derive(Debug)]
pub struct ClearSelectionOnTabSwitch;

impl PostEffect for ClearSelectionOnTabSwitch {
    fn analyze(&self, ctx: &EffectContext<'_>) -> Vec<SelectionEffect> {
        let activated = matches!(ctx.mutation, Some(Mutation::SetActiveTab { .. }));
        let switched = ctx.before.active_tab_id != ctx.after.active_tab_id;

        if (activated || switched) && ctx.selection.selected().is_some() {
            vec![SelectionEffect::Deselect]
        } else {
            vec![]
        }
    }
}

/// A selected id must resolve in the cross-tab region or the active tab
#[derive(Debug)]
pub struct DropStaleSelection;

impl PostEffect for DropStaleSelection {
    fn analyze(&self, ctx: &EffectContext<'_>) -> Vec<SelectionEffect> {
        match ctx.selection.selected() {
            Some(id) if forest::find(ctx.after, &ctx.after.active_tab_id, id).is_none() => {
                vec![SelectionEffect::Deselect]
            }
            _ => vec![],
        }
    }
}

/// Post-effect engine that applies all registered effects
#[derive(Debug)]
pub struct PostEffectEngine {
    effects: Vec<Box<dyn PostEffect>>,
}

impl PostEffectEngine {
    /// Create engine with default effects
    pub fn new() -> Self {
        Self {
            effects: vec![
                Box::new(ClearSelectionOnRemove),
                Box::new(ClearSelectionOnTabSwitch),
                Box::new(DropStaleSelection),
            ],
        }
    }

    pub fn analyze(&self, ctx: &EffectContext<'_>) -> Vec<SelectionEffect> {
        let mut effects = Vec::new();
        for effect in &self.effects {
            effects.append(&mut effect.analyze(ctx));
        }
        effects
    }

    /// Run every effect for the `before` → `after` change and apply the
    /// result to `selection`. Returns the effects that fired.
    pub fn settle(
        &self,
        mutation: Option<&Mutation>,
        before: &WebsiteData,
        after: &WebsiteData,
        selection: &mut Selection,
    ) -> Vec<SelectionEffect> {
        let effects = {
            let ctx = EffectContext {
                mutation,
                before,
                after,
                selection,
            };
            self.analyze(&ctx)
        };

        for effect in &effects {
            match effect {
                SelectionEffect::Deselect => selection.selected_component_id = None,
            }
        }
        effects
    }
}

impl Default for PostEffectEngine {
    fn default() -> Self {
        Self::new()
    }
}
