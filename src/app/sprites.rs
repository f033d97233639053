use std::collections::HashSet;

use log::warn;

type Sprite = &'static [&'static str];

const SPRITES: &[(&str, Sprite)] = &[
    ("plant1_1", &["       ", "   ,   ", "  _|_  "]),
    ("plant1_2", &["   @   ", "  \\|/  ", "  _|_  "]),
    ("plant1_3", &[" @ @ @ ", "  \\|/  ", " __|__ "]),
    ("plant2_1", &["       ", "   .   ", "  _|_  "]),
    ("plant2_2", &["  (o)  ", "   |   ", "  _|_  "]),
    ("plant2_3", &[" (o o) ", "(o o o)", "  _|_  "]),
    ("plant3_1", &["       ", "   ^   ", "  _|_  "]),
    ("plant3_2", &["  /^\\  ", " /^^^\\ ", "   |   "]),
    ("plant3_3", &["  /^\\  ", " /^^^\\ ", "/^^|^^\\"]),
];

const PLACEHOLDER: Sprite = &["  ? ?  ", " ?   ? ", "  ? ?  "];

pub(super) struct SpriteBook {
    reported_missing: HashSet<String>,
}

impl SpriteBook {
    pub(super) fn new() -> Self {
        Self {
            reported_missing: HashSet::new(),
        }
    }

    pub(super) fn lookup(&mut self, name: &str) -> Sprite {
        if let Some((_, sprite)) = SPRITES.iter().find(|(key, _)| *key == name) {
            return *sprite;
        }

        if self.reported_missing.insert(name.to_string()) {
            warn!("Missing sprite {}, drawing placeholder", name);
        }
        PLACEHOLDER
    }
}
