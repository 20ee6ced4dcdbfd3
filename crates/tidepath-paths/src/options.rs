use crate::error::SearchError;

/// Movement cost table used when expanding neighbours.
///
/// Every step pays `walk_cost`, or `swim_cost` when it ends in liquid.
/// Stepping up one block adds `jump_cost`; dropping onto dry ground adds
/// `drop_cost` per block fallen; moving from dry land into liquid adds
/// `swim_cost_enter`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathingOptions {
    pub walk_cost: f64,
    pub jump_cost: f64,
    pub drop_cost: f64,
    pub swim_cost: f64,
    pub swim_cost_enter: f64,
    /// How many blocks an agent may fall in a single step.
    pub max_drop: i32,
    /// Whether liquid cells may be entered at all.
    pub can_swim: bool,
}

impl Default for PathingOptions {
    fn default() -> Self {
        Self {
            walk_cost: 1.0,
            jump_cost: 2.0,
            drop_cost: 1.0,
            swim_cost: 1.5,
            swim_cost_enter: 25.0,
            max_drop: 4,
            can_swim: true,
        }
    }
}

impl PathingOptions {
    /// Copy of these options with liquid traversal costing nothing extra.
    pub fn without_swim_penalty(self) -> Self {
        Self {
            swim_cost: 0.0,
            swim_cost_enter: 0.0,
            ..self
        }
    }

    pub fn with_can_swim(self, can_swim: bool) -> Self {
        Self { can_swim, ..self }
    }

    pub fn with_max_drop(self, max_drop: i32) -> Self {
        Self { max_drop, ..self }
    }

    /// Check that every cost is finite and non-negative.
    pub fn validate(&self) -> Result<(), SearchError> {
        let costs = [
            ("walk_cost", self.walk_cost),
            ("jump_cost", self.jump_cost),
            ("drop_cost", self.drop_cost),
            ("swim_cost", self.swim_cost),
            ("swim_cost_enter", self.swim_cost_enter),
        ];
        for (name, value) in costs {
            if !value.is_finite() || value < 0.0 {
                return Err(SearchError::InvalidCost { name, value });
            }
        }
        if self.max_drop < 0 {
            return Err(SearchError::InvalidDistance {
                name: "max_drop",
                value: self.max_drop,
            });
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let opts: PathingOptions = serde_json::from_str(r#"{"swim_cost": 3.0}"#).unwrap();
        assert_eq!(opts.swim_cost, 3.0);
        assert_eq!(opts.walk_cost, PathingOptions::default().walk_cost);
        assert!(opts.can_swim);
    }
}
