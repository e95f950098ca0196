//! Style template catalog
//!
//! The set of renderable styles ships with the binary and is identical on
//! every node, so catalog lookups never touch the store. Each template
//! couples a stable key with the display name shown to clients, the prompt
//! fragment handed to the generation backend, and the path of its preview
//! image in the media store.

use crate::ids::StyleKey;
use serde::{Deserialize, Serialize};

/// Collection a style template belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleCollection {
    Male,
    Female,
}

impl StyleCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleCollection::Male => "male",
            StyleCollection::Female => "female",
        }
    }
}

/// A single renderable style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleTemplate {
    pub key: StyleKey,
    pub collection: StyleCollection,
    /// Name shown in client pickers.
    pub display_name: String,
    /// Fragment spliced into the generation prompt.
    pub prompt: String,
    /// Preview image location in the media store.
    pub image_path: String,
}

/// Built-in style templates, keyed for lookup.
///
/// Invariant: keys are unique across collections.
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    templates: Vec<StyleTemplate>,
}

impl StyleCatalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        let templates = BUILTIN_TEMPLATES
            .iter()
            .map(|(key, collection, display_name, prompt)| StyleTemplate {
                key: StyleKey::new(*key),
                collection: *collection,
                display_name: (*display_name).to_string(),
                prompt: (*prompt).to_string(),
                image_path: format!("styles/{key}.png"),
            })
            .collect();
        Self { templates }
    }

    /// All templates, male collection first, in catalog order.
    pub fn all(&self) -> &[StyleTemplate] {
        &self.templates
    }

    /// Look up a template by key.
    pub fn get(&self, key: &StyleKey) -> Option<&StyleTemplate> {
        self.templates.iter().find(|t| &t.key == key)
    }

    /// Whether `key` names a built-in template.
    pub fn contains(&self, key: &StyleKey) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

type TemplateRow = (&'static str, StyleCollection, &'static str, &'static str);

const BUILTIN_TEMPLATES: &[TemplateRow] = &[
    (
        "male_korean_wolf_cut",
        StyleCollection::Male,
        "韓系碎蓋頭",
        "a Korean wolf cut, featuring layered and textured hair with a longer back and shorter sides.",
    ),
    (
        "male_taper_fade",
        StyleCollection::Male,
        "漸層油頭",
        "a taper fade haircut, characterized by hair that gradually shortens from the top to the bottom, creating a seamless gradient effect.",
    ),
    (
        "male_buzz_cut",
        StyleCollection::Male,
        "美式寸頭",
        "a buzz cut, a very short haircut of uniform length all over the head.",
    ),
    (
        "male_american_curls",
        StyleCollection::Male,
        "美式捲髮",
        "an American-style curly haircut, with defined and textured curls on top and clean sides.",
    ),
    (
        "male_middle_part_bob",
        StyleCollection::Male,
        "中分短髮",
        "a middle part bob haircut, with hair parted down the center and falling just below the ears.",
    ),
    (
        "male_longer_wolf_cut",
        StyleCollection::Male,
        "中長髮狼剪",
        "a longer wolf cut, featuring choppy, layered hair with a shaggy texture and bangs.",
    ),
    (
        "male_pompadour",
        StyleCollection::Male,
        "飛機頭",
        "a pompadour haircut, with a large volume of hair swept up from the face and worn high over the forehead.",
    ),
    (
        "male_slicked_back_undercut",
        StyleCollection::Male,
        "後梳Undercut",
        "a slicked back undercut, with the sides and back of the head shaved or faded and the top hair combed straight back.",
    ),
    (
        "male_teddy_bear_perm",
        StyleCollection::Male,
        "泰迪捲",
        "a teddy bear perm, featuring fluffy, voluminous, and loose curls that frame the face.",
    ),
    (
        "male_samurai_bun",
        StyleCollection::Male,
        "武士頭",
        "a samurai bun, where the top section of the hair is tied into a bun at the crown while the rest hangs loose.",
    ),
    (
        "female_hime_cut",
        StyleCollection::Female,
        "公主切",
        "a hime cut, a Japanese hairstyle with straight, cheek-length side locks and a blunt, straight fringe.",
    ),
    (
        "female_high_layered_lob",
        StyleCollection::Female,
        "高層次鎖骨髮",
        "a high-layered lob, a shoulder-length bob with layers to create movement and volume.",
    ),
    (
        "female_japanese_wool_perm",
        StyleCollection::Female,
        "日系羊毛捲",
        "a Japanese wool perm, featuring fluffy, soft, and naturally voluminous curls.",
    ),
    (
        "female_korean_layered_short_hair",
        StyleCollection::Female,
        "韓系層次短髮",
        "a Korean-style layered short hair, with soft layers and texture that frames the face.",
    ),
    (
        "female_french_wave_mid_length_hair",
        StyleCollection::Female,
        "法式波浪中長髮",
        "a French wave hairstyle, featuring loose, effortless waves on mid-length hair.",
    ),
    (
        "female_hidden_earlobe_dye",
        StyleCollection::Female,
        "耳圈染",
        "a hidden earlobe dye, with a different color of hair dyed on the inner strands near the ears.",
    ),
    (
        "female_manga_bangs",
        StyleCollection::Female,
        "漫畫瀏海",
        "a manga bangs, a thick, straight, and blunt fringe that frames the eyes.",
    ),
    (
        "female_shoulder_length_flip_out",
        StyleCollection::Female,
        "齊肩外翹短髮",
        "a shoulder-length bob, where the ends are styled to flip outwards.",
    ),
    (
        "female_lazy_curls",
        StyleCollection::Female,
        "慵懶捲髮",
        "a lazy curls hairstyle, featuring loose, casual, and slightly messy curls that give an effortless look.",
    ),
    (
        "female_collarbone_hime_cut",
        StyleCollection::Female,
        "鎖骨公主切",
        "a collarbone-length hime cut, with side sections reaching the collarbone and a blunt fringe.",
    ),
];
