//! Interface copy in English and Arabic, with `{param}` interpolation.
//!
//! Lookup falls back to the key itself when a key is missing, so a frontend
//! probing for copy it ships locally degrades gracefully instead of erroring.

use serde::{Deserialize, Serialize};

use crate::util::fill_template;

/// Interface language. Persisted raw under `catflex-language`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  #[default]
  En,
  Ar,
}

impl Language {
  pub fn code(&self) -> &'static str {
    match self {
      Language::En => "en",
      Language::Ar => "ar",
    }
  }

  /// Parse a stored/requested code; unknown codes return None and callers
  /// keep their current language.
  pub fn from_code(code: &str) -> Option<Language> {
    match code {
      "en" => Some(Language::En),
      "ar" => Some(Language::Ar),
      _ => None,
    }
  }
}

/// Look up `key` for a language and fill `{param}` placeholders.
pub fn t(lang: Language, key: &str, params: &[(&str, &str)]) -> String {
  let text = table_for(lang)
    .iter()
    .find(|(k, _)| *k == key)
    .map(|(_, v)| *v)
    .unwrap_or(key);
  fill_template(text, params)
}

/// Raw key/value table for a language, e.g. for shipping to the frontend.
pub fn table_for(lang: Language) -> &'static [(&'static str, &'static str)] {
  match lang {
    Language::En => EN,
    Language::Ar => AR,
  }
}

const EN: &[(&str, &str)] = &[
  ("title", "CatFlex"),
  ("subtitle", "Learn CSS Flexbox with fun, {name}!"),
  ("welcome", "Welcome to CatFlex!"),
  ("welcomeMessage", "Let's learn CSS Flexbox together with fun characters and exciting challenges!"),
  ("enterName", "What's your name?"),
  ("namePlaceholder", "Enter your name..."),
  ("startLearning", "Start Learning!"),
  ("overallProgress", "Overall Progress"),
  ("codeEditor", "CSS Editor"),
  ("score", "Score"),
  ("instructions", "Hey {name}! {instruction}"),
  ("hint", "Hint"),
  ("left", "left"),
  ("reset", "Reset"),
  ("challenge", "Challenge"),
  ("beginner", "Beginner"),
  ("intermediate", "Intermediate"),
  ("advanced", "Advanced"),
  ("attempts", "Attempts"),
  ("hints", "Hints"),
  ("selectTheme", "Select Theme"),
  ("cats", "Cats"),
  ("space", "Space"),
  ("food", "Food"),
  ("robots", "Robots"),
  ("tierComplete", "Amazing work {name}! You've completed the {tier} level!"),
  ("continue", "Continue Learning"),
  ("notCorrectYet", "{name}, the elements aren't in the right position yet. Try adjusting your CSS!"),
];

const AR: &[(&str, &str)] = &[
  ("title", "كات فليكس"),
  ("subtitle", "تعلم CSS Flexbox بمتعة، {name}!"),
  ("welcome", "مرحباً بك في كات فليكس!"),
  ("welcomeMessage", "هيا نتعلم CSS Flexbox معاً بشخصيات ممتعة وتحديات مثيرة!"),
  ("enterName", "ما اسمك؟"),
  ("namePlaceholder", "أدخل اسمك..."),
  ("startLearning", "ابدأ التعلم!"),
  ("overallProgress", "التقدم العام"),
  ("codeEditor", "محرر CSS"),
  ("score", "النقاط"),
  ("instructions", "مرحباً {name}! {instruction}"),
  ("hint", "تلميح"),
  ("left", "متبقي"),
  ("reset", "إعادة تعيين"),
  ("challenge", "التحدي"),
  ("beginner", "مبتدئ"),
  ("intermediate", "متوسط"),
  ("advanced", "متقدم"),
  ("attempts", "المحاولات"),
  ("hints", "التلميحات"),
  ("selectTheme", "اختر الموضوع"),
  ("cats", "قطط"),
  ("space", "فضاء"),
  ("food", "طعام"),
  ("robots", "روبوتات"),
  ("tierComplete", "عاش {name}! لقد أكملت مستوى {tier}!"),
  ("continue", "واصل التعلم"),
  ("notCorrectYet", "{name}، العناصر ليست في المكان الصحيح بعد. جرب تعديل CSS!"),
];
