use crate::schedule::{Entry, ScheduleStore, Slot, SlotVariant};
use crate::status::Code;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guardian {
    Mother,
    Father,
}

impl Guardian {
    fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'm' => Some(Guardian::Mother),
            'f' => Some(Guardian::Father),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            Guardian::Mother => 'm',
            Guardian::Father => 'f',
        }
    }

    fn index(self) -> usize {
        match self {
            Guardian::Mother => 0,
            Guardian::Father => 1,
        }
    }
}

/// A decoded form field coordinate. The wire form is
/// `w<week>_pick_up_<1|2>_<m|f><day>` in the pair layout and
/// `w<week>_pick_up_<1|2>_<day>` in the single layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKey {
    pub week: usize,
    pub slot: Slot,
    pub day: usize,
    pub guardian: Option<Guardian>,
}

impl FieldKey {
    /// Total decode: anything that does not match the grammar for the active
    /// layout is `None`, which callers treat as "ignore this field".
    pub fn parse(key: &str, variant: SlotVariant) -> Option<Self> {
        let rest = key.strip_prefix('w')?;
        let sep = rest.find('_')?;
        let week: usize = rest[..sep].parse().ok()?;
        let rest = &rest[sep + 1..];

        let (slot, rest) = if let Some(rest) = rest.strip_prefix("pick_up_1_") {
            (Slot::PickUp1, rest)
        } else if let Some(rest) = rest.strip_prefix("pick_up_2_") {
            (Slot::PickUp2, rest)
        } else {
            return None;
        };

        let (guardian, rest) = match variant {
            SlotVariant::Pair => {
                let mut chars = rest.chars();
                let guardian = Guardian::from_tag(chars.next()?)?;
                (Some(guardian), chars.as_str())
            }
            SlotVariant::Single => (None, rest),
        };

        if rest.is_empty() {
            return None;
        }
        let day: usize = rest.parse().ok()?;

        Some(FieldKey {
            week,
            slot,
            day,
            guardian,
        })
    }

    /// The wire name for this coordinate; inverse of `parse`.
    pub fn name(&self) -> String {
        let slot = match self.slot {
            Slot::PickUp1 => "pick_up_1",
            Slot::PickUp2 => "pick_up_2",
        };
        match self.guardian {
            Some(guardian) => format!("w{}_{slot}_{}{}", self.week, guardian.tag(), self.day),
            None => format!("w{}_{slot}_{}", self.week, self.day),
        }
    }
}

/// Best-effort merge of a form submission into the store. Fields with
/// unrecognized keys, non-integer values, or out-of-range coordinates are
/// skipped; the rest still apply. Returns the number of cells written.
/// The caller saves the store once afterwards.
pub fn apply_form(
    store: &mut ScheduleStore,
    variant: SlotVariant,
    fields: &[(String, String)],
) -> usize {
    let mut updated = 0;
    for (key, value) in fields {
        let Some(key) = FieldKey::parse(key, variant) else {
            continue;
        };
        let Ok(code) = value.trim().parse::<Code>() else {
            continue;
        };
        let Some(week) = store.week_mut(key.week) else {
            continue;
        };
        let Some(entry) = week.slot_mut(key.slot).get_mut(key.day) else {
            continue;
        };
        match (entry, key.guardian) {
            (Entry::Single(cell), None) => {
                *cell = code;
                updated += 1;
            }
            (Entry::Pair(cells), Some(guardian)) => {
                cells[guardian.index()] = code;
                updated += 1;
            }
            _ => {}
        }
    }
    updated
}
