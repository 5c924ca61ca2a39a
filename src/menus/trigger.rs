use std::collections::HashSet;

use crate::error::{MenuError, MenuResult};

/// Binds a reaction glyph to one of a menu's actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger<A> {
    pub symbol: String,
    pub action: A,
    /// Where the reaction goes relative to the others. Unpositioned triggers keep list order
    /// after the positioned ones.
    pub position: Option<usize>,
}

impl<A> Trigger<A> {
    pub fn new(symbol: impl Into<String>, action: A) -> Self {
        Self {
            symbol: symbol.into(),
            action,
            position: None,
        }
    }

    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

#[derive(Debug, Clone)]
pub struct TriggerTable<A> {
    triggers: Vec<Trigger<A>>,
}

impl<A> TriggerTable<A> {
    pub fn new(mut triggers: Vec<Trigger<A>>) -> MenuResult<Self> {
        if triggers.is_empty() {
            return Err(MenuError::config("a menu needs at least one trigger"));
        }

        let mut seen = HashSet::new();
        for trigger in &triggers {
            if !seen.insert(trigger.symbol.as_str()) {
                return Err(MenuError::config(format!(
                    "reaction {} is bound more than once",
                    trigger.symbol
                )));
            }
        }

        // stable, so equal positions keep their list order
        triggers.sort_by_key(|t| t.position.unwrap_or(usize::MAX));
        Ok(Self { triggers })
    }

    pub fn find(&self, symbol: &str) -> Option<&Trigger<A>> {
        self.triggers.iter().find(|t| t.symbol == symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.triggers.iter().map(|t| t.symbol.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_symbols_are_rejected() {
        let table = TriggerTable::new(vec![Trigger::new("✅", 1), Trigger::new("✅", 2)]);
        assert!(matches!(table, Err(MenuError::Configuration(_))));
    }

    #[test]
    fn positions_order_the_reactions() {
        let table = TriggerTable::new(vec![
            Trigger::new("c", 3),
            Trigger::new("a", 1).at(0),
            Trigger::new("b", 2).at(1),
        ])
        .unwrap();
        assert_eq!(table.symbols().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn lookup_is_by_exact_symbol() {
        let table = TriggerTable::new(vec![Trigger::new("▶️", "right")]).unwrap();
        assert_eq!(table.find("▶️").map(|t| t.action), Some("right"));
        assert!(table.find("▶").is_none());
    }
}
