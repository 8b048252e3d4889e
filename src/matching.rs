use crate::palette::{ColorIdx, Palette};

// One slot assignment: pixels holding `source` in the subject image are
// rewritten to `target`, the slot the color occupies in the reference.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct MapEntry {
    pub source: ColorIdx,
    pub target: ColorIdx,
}

// A total bijection on the 16 palette slots.
pub struct ColorMapping {
    entries: [MapEntry; 16],
    targets: [ColorIdx; 16], // indexed by source slot
}

impl ColorMapping {
    fn new(entries: Vec<MapEntry>) -> Self {
        assert!(entries.len() == 16, "mapping must cover all 16 slots");
        let mut targets = [0; 16];
        let mut source_seen = [false; 16];
        let mut target_seen = [false; 16];
        for entry in &entries {
            assert!(
                !source_seen[entry.source as usize],
                "duplicate source slot in mapping"
            );
            assert!(
                !target_seen[entry.target as usize],
                "duplicate target slot in mapping"
            );
            source_seen[entry.source as usize] = true;
            target_seen[entry.target as usize] = true;
            targets[entry.source as usize] = entry.target;
        }
        ColorMapping {
            entries: entries.try_into().unwrap(),
            targets,
        }
    }

    pub fn target_of(&self, source: ColorIdx) -> ColorIdx {
        self.targets[source as usize]
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }
}

// Computes the slot mapping that takes the subject palette onto the
// reference palette. Matching is greedy: each subject slot takes the
// lowest-numbered unclaimed reference slot holding an equal color, first
// match wins. Subject slots left over (colors absent from the reference, or
// duplicated in the subject) are then paired ordinally with the leftover
// reference slots, lowest to lowest. No color-distance heuristic is used.
pub fn match_palettes(subject: &Palette, reference: &Palette) -> ColorMapping {
    let mut entries: Vec<MapEntry> = Vec::with_capacity(16);
    let mut mapped = [false; 16];
    let mut claimed = [false; 16];

    for source in 0..16 {
        for target in 0..16 {
            if claimed[target] {
                continue;
            }
            if subject.colors[source] == reference.colors[target] {
                entries.push(MapEntry {
                    source: source as ColorIdx,
                    target: target as ColorIdx,
                });
                mapped[source] = true;
                claimed[target] = true;
                break;
            }
        }
    }

    for source in 0..16 {
        if mapped[source] {
            continue;
        }
        for target in 0..16 {
            if !claimed[target] {
                entries.push(MapEntry {
                    source: source as ColorIdx,
                    target: target as ColorIdx,
                });
                claimed[target] = true;
                break;
            }
        }
    }

    ColorMapping::new(entries)
}
