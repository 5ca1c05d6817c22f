/// Direction of a cash flow. Persisted as a boolean flag, `true` meaning income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Income,
    Expense,
}

impl OperationType {
    pub fn from_flag(flag: bool) -> Self {
        if flag {
            Self::Income
        } else {
            Self::Expense
        }
    }

    pub fn as_flag(self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" | "in" | "доход" => Some(Self::Income),
            "expense" | "out" | "расход" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
