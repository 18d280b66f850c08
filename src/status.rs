use serde::Deserialize;
use tracing::warn;

/// Status codes are schema-local small integers; never compare codes across
/// schemas.
pub type Code = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Html,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDef {
    pub code: Code,
    pub desc: &'static str,
    pub text: &'static str,
    pub html: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Schema {
    SixCode,
    FiveCode,
}

// Kept in ascending code order so the legend comes out sorted.
static SIX_CODE_DEFS: [StatusDef; 7] = [
    StatusDef {
        code: 0,
        desc: "Unavailable",
        text: "\u{2717}",
        html: "<span class='status-cross' title='Unavailable'>&#10007;</span>",
    },
    StatusDef {
        code: 1,
        desc: "Available",
        text: "\u{2713}",
        html: "<span class='status-tick' title='Available'>&#10003;</span>",
    },
    StatusDef {
        code: 2,
        desc: "Complicated Drop-off",
        text: "\u{26A0}",
        html: "<span class='status-complicated' title='Complicated Drop-off'>&#9888;</span>",
    },
    StatusDef {
        code: 3,
        desc: "Travel",
        text: "\u{2708}",
        html: "<span class='status-travel' title='Travel'>&#9992;</span>",
    },
    StatusDef {
        code: 4,
        desc: "Office",
        text: "\u{1F4BC}",
        html: "<span class='status-office' title='Office'>&#128188;</span>",
    },
    StatusDef {
        code: 5,
        desc: "Holiday/No School",
        text: "\u{2600}",
        html: "<span class='status-holiday' title='Holiday/No School'>&#9728;</span>",
    },
    StatusDef {
        code: 6,
        desc: "Unknown / TBD",
        text: "?",
        html: "<span class='status-unknown' title='Unknown / TBD'>?</span>",
    },
];

static FIVE_CODE_DEFS: [StatusDef; 5] = [
    StatusDef {
        code: 0,
        desc: "Unavailable",
        text: "\u{2717}",
        html: "<span class='status-cross' title='Unavailable'>&#10007;</span>",
    },
    StatusDef {
        code: 1,
        desc: "Available",
        text: "\u{2713}",
        html: "<span class='status-tick' title='Available'>&#10003;</span>",
    },
    StatusDef {
        code: 2,
        desc: "Travel",
        text: "\u{2708}",
        html: "<span class='status-travel' title='Travel'>&#9992;</span>",
    },
    StatusDef {
        code: 3,
        desc: "Office",
        text: "\u{1F4BC}",
        html: "<span class='status-office' title='Office'>&#128188;</span>",
    },
    StatusDef {
        code: 4,
        desc: "Unknown / TBD",
        text: "?",
        html: "<span class='status-unknown' title='Unknown / TBD'>?</span>",
    },
];

static SIX_CODE: Registry = Registry {
    defs: &SIX_CODE_DEFS,
    // Holiday
    default: &SIX_CODE_DEFS[5],
};

static FIVE_CODE: Registry = Registry {
    defs: &FIVE_CODE_DEFS,
    // Unknown
    default: &FIVE_CODE_DEFS[4],
};

impl Schema {
    pub fn registry(self) -> &'static Registry {
        match self {
            Schema::SixCode => &SIX_CODE,
            Schema::FiveCode => &FIVE_CODE,
        }
    }
}

#[derive(Debug)]
pub struct Registry {
    defs: &'static [StatusDef],
    default: &'static StatusDef,
}

impl Registry {
    pub fn default_code(&self) -> Code {
        self.default.code
    }

    pub fn get(&self, code: Code) -> Option<&'static StatusDef> {
        self.defs.iter().find(|def| def.code == code)
    }

    /// Lookup that never fails: unknown codes degrade to the default
    /// definition with a diagnostic on the log.
    pub fn describe(&self, code: Code) -> &'static StatusDef {
        match self.get(code) {
            Some(def) => def,
            None => {
                warn!("unknown status code {code}, using default");
                self.default
            }
        }
    }

    pub fn symbol(&self, code: Code, format: Format) -> &'static str {
        let def = self.describe(code);
        match format {
            Format::Text => def.text,
            Format::Html => def.html,
        }
    }

    /// All definitions, ascending by code. One `<li>` each in the HTML legend.
    pub fn legend_items(&self) -> impl Iterator<Item = &'static StatusDef> {
        self.defs.iter()
    }
}
