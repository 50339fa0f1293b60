//! Built-in content: the nine flexbox challenges and the four visual themes.
//!
//! Copy (titles, instructions, hints, starting code) can be overridden from
//! a TOML content pack; the acceptance rules cannot, they are data here and
//! stay in code.

use crate::domain::{
  Challenge, RequiredDeclaration, SolutionRule, TargetPosition, Theme, ThemeElements, Tier,
};

/// Every level starts from the same scaffold.
pub const DEFAULT_STARTING_CODE: &str = ".flex-container {\n  display: flex;\n  /* Add your CSS here */\n}";

macro_rules! req {
  ($property:expr, $value:expr) => {
    RequiredDeclaration { property: $property, value: $value }
  };
}

const RULE_VERTICAL_STACK: &[RequiredDeclaration] = &[req!("flex-direction", "column")];
const RULE_HORIZONTAL_CENTER: &[RequiredDeclaration] = &[req!("justify-content", "center")];
const RULE_VERTICAL_CENTER: &[RequiredDeclaration] = &[req!("align-items", "center")];
const RULE_REVERSE_DISTRIBUTED: &[RequiredDeclaration] =
  &[req!("flex-direction", "row-reverse"), req!("justify-content", "space-between")];
const RULE_COLUMN_FLEX_END: &[RequiredDeclaration] =
  &[req!("flex-direction", "column"), req!("align-items", "flex-end")];
const RULE_PERFECT_CENTER: &[RequiredDeclaration] =
  &[req!("justify-content", "center"), req!("align-items", "center")];
const RULE_COMPLEX_REVERSE: &[RequiredDeclaration] = &[
  req!("flex-direction", "row-reverse"),
  req!("justify-content", "space-evenly"),
  req!("align-items", "flex-start"),
];
const RULE_MASTER: &[RequiredDeclaration] = &[
  req!("flex-direction", "column-reverse"),
  req!("justify-content", "space-between"),
  req!("align-items", "center"),
];

/// The full level table, in play order.
pub fn seed_challenges() -> Vec<Challenge> {
  vec![
    Challenge {
      ordinal: 0,
      title: "Basic Row Layout".into(),
      tier: Tier::Beginner,
      instructions: "Make the cats line up side by side in a row".into(),
      starting_code: DEFAULT_STARTING_CODE.into(),
      hints: vec![
        "First, you need to make the container a flex container (already done!)".into(),
        "Use the flex-direction property to control layout direction".into(),
        "Try setting flex-direction to 'row'".into(),
      ],
      target_positions: Some(vec![
        TargetPosition { x: 25, y: 50 },
        TargetPosition { x: 50, y: 50 },
        TargetPosition { x: 75, y: 50 },
      ]),
      learning_objective: "Understanding flex-direction property".into(),
      rule: SolutionRule::RowOrDefault,
    },
    Challenge {
      ordinal: 1,
      title: "Vertical Stack".into(),
      tier: Tier::Beginner,
      instructions: "Stack the cats on top of each other".into(),
      starting_code: DEFAULT_STARTING_CODE.into(),
      hints: vec![
        "You need to change the direction from row to column".into(),
        "Use flex-direction property".into(),
        "Set flex-direction to 'column'".into(),
      ],
      target_positions: Some(vec![
        TargetPosition { x: 50, y: 25 },
        TargetPosition { x: 50, y: 50 },
        TargetPosition { x: 50, y: 75 },
      ]),
      learning_objective: "Column direction layout".into(),
      rule: SolutionRule::All(RULE_VERTICAL_STACK),
    },
    Challenge {
      ordinal: 2,
      title: "Horizontal Centering".into(),
      tier: Tier::Beginner,
      instructions: "Move the cats to the horizontal center of their container".into(),
      starting_code: DEFAULT_STARTING_CODE.into(),
      hints: vec![
        "You need to center items along the main axis".into(),
        "Use justify-content property for main axis alignment".into(),
        "Set justify-content to 'center'".into(),
      ],
      target_positions: None,
      learning_objective: "Understanding justify-content for main axis alignment".into(),
      rule: SolutionRule::All(RULE_HORIZONTAL_CENTER),
    },
    Challenge {
      ordinal: 3,
      title: "Vertical Centering".into(),
      tier: Tier::Beginner,
      instructions: "Center the cats vertically in their container".into(),
      starting_code: DEFAULT_STARTING_CODE.into(),
      hints: vec![
        "You need to center items along the cross axis".into(),
        "Use align-items property for cross axis alignment".into(),
        "Set align-items to 'center'".into(),
      ],
      target_positions: None,
      learning_objective: "Understanding align-items for cross axis alignment".into(),
      rule: SolutionRule::All(RULE_VERTICAL_CENTER),
    },
    Challenge {
      ordinal: 4,
      title: "Reverse Row with Distribution".into(),
      tier: Tier::Intermediate,
      instructions: "Flip the cat order and spread them apart with equal spacing".into(),
      starting_code: DEFAULT_STARTING_CODE.into(),
      hints: vec![
        "You need to reverse the direction and add spacing".into(),
        "Use flex-direction: row-reverse and justify-content for spacing".into(),
        "Try justify-content: space-between".into(),
      ],
      target_positions: None,
      learning_objective: "Combining direction and distribution properties".into(),
      rule: SolutionRule::All(RULE_REVERSE_DISTRIBUTED),
    },
    Challenge {
      ordinal: 5,
      title: "Column with Cross-Axis Alignment".into(),
      tier: Tier::Intermediate,
      instructions: "Stack the cats vertically and move them to the right edge".into(),
      starting_code: DEFAULT_STARTING_CODE.into(),
      hints: vec![
        "You need column direction and right alignment".into(),
        "Use flex-direction: column and align-items for positioning".into(),
        "Set align-items to 'flex-end'".into(),
      ],
      target_positions: None,
      learning_objective: "Vertical layout with horizontal positioning".into(),
      rule: SolutionRule::All(RULE_COLUMN_FLEX_END),
    },
    Challenge {
      ordinal: 6,
      title: "Perfect Center Alignment".into(),
      tier: Tier::Intermediate,
      instructions: "Center the cats perfectly in the middle of the container".into(),
      starting_code: DEFAULT_STARTING_CODE.into(),
      hints: vec![
        "You need to center on both axes".into(),
        "Use justify-content: center for main axis".into(),
        "Use align-items: center for cross axis".into(),
      ],
      target_positions: None,
      learning_objective: "Simultaneous main and cross axis centering".into(),
      rule: SolutionRule::All(RULE_PERFECT_CENTER),
    },
    Challenge {
      ordinal: 7,
      title: "Complex Reverse Layout".into(),
      tier: Tier::Advanced,
      instructions: "Create a reverse row with cats evenly distributed and aligned to the top".into(),
      starting_code: DEFAULT_STARTING_CODE.into(),
      hints: vec![
        "You need reverse direction, even distribution, and top alignment".into(),
        "Use flex-direction: row-reverse, justify-content: space-evenly".into(),
        "Add align-items: flex-start for top alignment".into(),
      ],
      target_positions: None,
      learning_objective: "Multiple property coordination".into(),
      rule: SolutionRule::All(RULE_COMPLEX_REVERSE),
    },
    Challenge {
      ordinal: 8,
      title: "Master Challenge".into(),
      tier: Tier::Advanced,
      instructions: "Create the ultimate flex layout: reverse column, spaced apart, and centered".into(),
      starting_code: DEFAULT_STARTING_CODE.into(),
      hints: vec![
        "This combines all concepts: reverse column with spacing and centering".into(),
        "Use flex-direction: column-reverse, justify-content: space-between".into(),
        "Add align-items: center for horizontal centering".into(),
      ],
      target_positions: None,
      learning_objective: "All concepts combined in complex arrangement".into(),
      rule: SolutionRule::All(RULE_MASTER),
    },
  ]
}

/// The four element themes the picker offers.
pub fn seed_themes() -> Vec<Theme> {
  vec![
    Theme {
      id: "cats",
      name: "cats",
      icon: "cat",
      gradient: "bg-gradient-to-r from-pink-500 to-purple-600",
      elements: ThemeElements {
        emoji: ["🐱", "🐈", "😺"],
        names: ["Whiskers", "Shadow", "Mittens"],
      },
      celebration_animation: "animate-bounce",
    },
    Theme {
      id: "space",
      name: "space",
      icon: "rocket",
      gradient: "bg-gradient-to-r from-blue-500 to-cyan-600",
      elements: ThemeElements {
        emoji: ["🚀", "🛸", "🌟"],
        names: ["Rocket", "UFO", "Star"],
      },
      celebration_animation: "animate-pulse",
    },
    Theme {
      id: "food",
      name: "food",
      icon: "pizza",
      gradient: "bg-gradient-to-r from-yellow-500 to-orange-600",
      elements: ThemeElements {
        emoji: ["🍕", "🍔", "🍰"],
        names: ["Pizza", "Burger", "Cake"],
      },
      celebration_animation: "animate-spin",
    },
    Theme {
      id: "robots",
      name: "robots",
      icon: "bot",
      gradient: "bg-gradient-to-r from-green-500 to-teal-600",
      elements: ThemeElements {
        emoji: ["🤖", "⚙️", "🔧"],
        names: ["Bot", "Gear", "Tool"],
      },
      celebration_animation: "animate-ping",
    },
  ]
}
