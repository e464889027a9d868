//! Closed enum sets and their lookup tables.
//!
//! Each enum carries a bidirectional mapping: `label()` for the user-facing
//! string (used in display output and criterion matching) and `index()` for
//! the persisted integer. Persisted documents store the declaration-order
//! index, so the variant order below is part of the file format and must
//! not be rearranged.

/// Genre shared by books and films.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Novel,
    Mystery,
    ScienceFiction,
    Fantasy,
    Biography,
    Essay,
    History,
    Poetry,
    Other,
}

impl Genre {
    /// Declaration order; doubles as the persisted index space.
    pub const ALL: [Genre; 9] = [
        Genre::Novel,
        Genre::Mystery,
        Genre::ScienceFiction,
        Genre::Fantasy,
        Genre::Biography,
        Genre::Essay,
        Genre::History,
        Genre::Poetry,
        Genre::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Genre::Novel => "Romanzo",
            Genre::Mystery => "Giallo",
            Genre::ScienceFiction => "Fantascienza",
            Genre::Fantasy => "Fantasy",
            Genre::Biography => "Biografia",
            Genre::Essay => "Saggistica",
            Genre::History => "Storico",
            Genre::Poetry => "Poesia",
            Genre::Other => "Altro",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.label().eq_ignore_ascii_case(s))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl Default for Genre {
    fn default() -> Self {
        Self::Other
    }
}

/// Film classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    G,
    Pg,
    Pg13,
    R,
    Nc17,
}

impl Rating {
    pub const ALL: [Rating; 5] = [Rating::G, Rating::Pg, Rating::Pg13, Rating::R, Rating::Nc17];

    pub fn label(self) -> &'static str {
        match self {
            Rating::G => "G",
            Rating::Pg => "PG",
            Rating::Pg13 => "PG-13",
            Rating::R => "R",
            Rating::Nc17 => "NC-17",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.label().eq_ignore_ascii_case(s))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Article subject category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Science,
    Technology,
    Medicine,
    Economics,
    Culture,
    Politics,
    Sport,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Science,
        Category::Technology,
        Category::Medicine,
        Category::Economics,
        Category::Culture,
        Category::Politics,
        Category::Sport,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Science => "Scienza",
            Category::Technology => "Tecnologia",
            Category::Medicine => "Medicina",
            Category::Economics => "Economia",
            Category::Culture => "Cultura",
            Category::Politics => "Politica",
            Category::Sport => "Sport",
            Category::Other => "Altro",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

/// Kind of publication an article appeared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JournalType {
    Academic,
    Popular,
    Specialist,
    Daily,
    Weekly,
    Monthly,
    Online,
}

impl JournalType {
    pub const ALL: [JournalType; 7] = [
        JournalType::Academic,
        JournalType::Popular,
        JournalType::Specialist,
        JournalType::Daily,
        JournalType::Weekly,
        JournalType::Monthly,
        JournalType::Online,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JournalType::Academic => "Accademica",
            JournalType::Popular => "Divulgativa",
            JournalType::Specialist => "Specialistica",
            JournalType::Daily => "Quotidiana",
            JournalType::Weekly => "Settimanale",
            JournalType::Monthly => "Mensile",
            JournalType::Online => "Online",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|j| j.label().eq_ignore_ascii_case(s))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}
