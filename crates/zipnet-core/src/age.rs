/// Inclusive age range with its report label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBracket {
    pub label: &'static str,
    pub min: i64,
    pub max: i64,
}

impl AgeBracket {
    pub const fn new(label: &'static str, min: i64, max: i64) -> Self {
        Self { label, min, max }
    }

    pub fn contains(&self, age: i64) -> bool {
        age >= self.min && age <= self.max
    }
}

/// Contiguous over [0, 200]; scanned in order.
pub const AGE_BRACKETS: [AgeBracket; 6] = [
    AgeBracket::new("0-12", 0, 12),
    AgeBracket::new("13-17", 13, 17),
    AgeBracket::new("18-35", 18, 35),
    AgeBracket::new("36-50", 36, 50),
    AgeBracket::new("51-65", 51, 65),
    AgeBracket::new("66+", 66, 200),
];

pub fn age_bracket(age: i64) -> Option<&'static AgeBracket> {
    AGE_BRACKETS.iter().find(|bracket| bracket.contains(age))
}

pub fn age_group_label(age: i64) -> Option<&'static str> {
    age_bracket(age).map(|bracket| bracket.label)
}
