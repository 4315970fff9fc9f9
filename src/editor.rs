//! Property editor.
//!
//! Binds one style property to a [`GrammarContext`] and exposes the edit
//! loop a slot-based UI drives: expand the grammar, build the option table
//! for the current value, apply an edit to one slot.

use std::sync::Arc;

use vds::{
    Expansion, GrammarContext, OptionDefinition, SlotTable, apply_slot_edit, build_slot_options,
    pick_default_category, split,
};

use crate::error::{Result, StyleKitError};
use crate::properties::{StyleDefinition, property};

/// Editor for the values of one property.
#[derive(Debug, Clone, Copy)]
pub struct PropertyEditor<'a> {
    ctx: &'a GrammarContext,
    definition: &'static StyleDefinition,
}

impl<'a> PropertyEditor<'a> {
    /// Creates an editor for the property called `name`.
    pub fn new(ctx: &'a GrammarContext, name: &str) -> Result<Self> {
        let definition =
            property(name).ok_or_else(|| StyleKitError::UnknownProperty(name.to_string()))?;
        Ok(Self::for_definition(ctx, definition))
    }

    pub fn for_definition(ctx: &'a GrammarContext, definition: &'static StyleDefinition) -> Self {
        Self { ctx, definition }
    }

    pub fn definition(&self) -> &'static StyleDefinition {
        self.definition
    }

    pub fn expansion(&self) -> Result<Arc<Expansion>> {
        Ok(self.ctx.expand(self.definition.syntax)?)
    }

    /// Whether the grammar is fully known. When it is not, the UI should
    /// fall back to a plain text field.
    pub fn is_structured(&self) -> Result<bool> {
        Ok(!self.expansion()?.opaque)
    }

    pub fn slot_options(&self, value: &str) -> Result<SlotTable> {
        Ok(build_slot_options(self.ctx, self.definition.syntax, value)?)
    }

    /// Applies `new_fragment` at `slot` of `value` and returns the new value.
    pub fn apply(&self, value: &str, slot: usize, new_fragment: &str) -> Result<String> {
        let fragments = split(value);
        let edited = apply_slot_edit(
            self.ctx,
            self.definition.syntax,
            &fragments,
            slot,
            new_fragment,
        )?;
        log::debug!(
            "{}: slot {} `{}` -> `{}`",
            self.definition.name,
            slot,
            value,
            edited
        );
        Ok(edited)
    }

    /// The category whose widget should be shown first for `options`.
    pub fn default_category<'o>(&self, options: &'o [OptionDefinition]) -> Option<&'o str> {
        pick_default_category(self.ctx, options)
    }
}
