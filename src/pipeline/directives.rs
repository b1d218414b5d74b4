use anyhow::Result;

use crate::layers::normalize_layer_id;
use crate::models::{DateRange, QueryState, SortKey};

/// Directive fields accepted on the query line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveField {
    /// Restrict to a layer (repeatable, OR'd together)
    Layer,
    /// Inclusive start year
    From,
    /// Inclusive end year
    To,
    /// Sort key
    Sort,
    /// Bracketed title category (repeatable, OR'd together)
    Category,
}

/// Single field:value directive, already validated by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Layer(String),
    From(i32),
    To(i32),
    Sort(SortKey),
    Category(String),
}

impl Directive {
    pub fn field(&self) -> DirectiveField {
        match self {
            Directive::Layer(_) => DirectiveField::Layer,
            Directive::From(_) => DirectiveField::From,
            Directive::To(_) => DirectiveField::To,
            Directive::Sort(_) => DirectiveField::Sort,
            Directive::Category(_) => DirectiveField::Category,
        }
    }
}

/// Parsed directive portion of the query line.
///
/// Applying it to a [`QueryState`] yields a new state:
/// - Layers are replaced only when at least one `layer:` directive is present
/// - Date range, sort and categories are always replaced (absent = default), so an
///   empty directive list resets them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDirectives {
    pub directives: Vec<Directive>,
}

impl QueryDirectives {
    pub fn new() -> Self {
        Self { directives: Vec::new() }
    }

    pub fn push(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Build the state these directives describe, starting from `state`
    pub fn apply(&self, state: &QueryState) -> Result<QueryState> {
        let mut layers = Vec::new();
        let mut categories = Vec::new();
        let mut start_year = None;
        let mut end_year = None;
        let mut sort = SortKey::default();

        for directive in &self.directives {
            match directive {
                Directive::Layer(layer) => layers.push(normalize_layer_id(layer).to_string()),
                Directive::From(year) => start_year = Some(*year),
                Directive::To(year) => end_year = Some(*year),
                Directive::Sort(key) => sort = *key,
                Directive::Category(category) => categories.push(category.clone()),
            }
        }

        let mut next = state
            .clone()
            .with_date_range(DateRange::new(start_year, end_year)?)
            .with_sort(sort)
            .with_categories(categories);
        if !layers.is_empty() {
            next = next.with_layers(layers);
        }
        Ok(next)
    }
}
