use serde::Serialize;

/// A single translation table value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TranslationValue {
    /// Display string, possibly containing `{placeholder}` markers
    Text(&'static str),
    /// Ordered sequence of display strings (menus, lists of subjects, ...)
    List(&'static [&'static str]),
}

impl TranslationValue {
    /// The string value, if this is a text entry.
    pub fn as_text(&self) -> Option<&'static str> {
        match *self {
            TranslationValue::Text(text) => Some(text),
            TranslationValue::List(_) => None,
        }
    }

    /// The items, if this is a list entry.
    pub fn as_list(&self) -> Option<&'static [&'static str]> {
        match *self {
            TranslationValue::Text(_) => None,
            TranslationValue::List(items) => Some(items),
        }
    }

    /// Short name of the value kind ("text" or "list").
    pub fn kind(&self) -> &'static str {
        match self {
            TranslationValue::Text(_) => "text",
            TranslationValue::List(_) => "list",
        }
    }
}

/// All localized user-facing strings for a language.
///
/// Every language is an instance of this one struct, so a field added for one
/// language fails to compile until every other language provides it too.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Application ====================
    /// Product name shown in the header and window title
    pub app_name: &'static str,

    // ==================== Navigation ====================
    pub nav_home: &'static str,
    pub nav_tutors: &'static str,
    pub nav_sessions: &'static str,
    pub nav_profile: &'static str,
    pub nav_logout: &'static str,

    // ==================== Landing Page ====================
    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    pub cta_find_tutor: &'static str,
    pub cta_become_tutor: &'static str,

    /// Selling points listed under the hero section
    pub features: &'static [&'static str],

    /// Subjects offered, in catalogue order
    pub subjects: &'static [&'static str],

    // ==================== Account ====================
    /// Placeholders: {name}
    pub greeting: &'static str,

    // ==================== Sessions ====================
    /// Placeholders: {tutor}, {date}
    pub session_booked: &'static str,

    /// Weekday names, Monday first
    pub weekdays: &'static [&'static str],

    // ==================== Timer ====================
    pub timer_start: &'static str,
    pub timer_pause: &'static str,
    pub timer_reset: &'static str,

    /// Placeholders: {minutes}
    pub timer_remaining: &'static str,

    // ==================== Preferences ====================
    pub language_label: &'static str,
    pub theme_label: &'static str,
    pub theme_light: &'static str,
    pub theme_dark: &'static str,

    // ==================== Footer ====================
    pub footer_rights: &'static str,
}

impl LanguageStrings {
    /// Every lookup key, in declaration order.
    pub const KEYS: &'static [&'static str] = &[
        "app_name",
        "nav_home",
        "nav_tutors",
        "nav_sessions",
        "nav_profile",
        "nav_logout",
        "hero_title",
        "hero_subtitle",
        "cta_find_tutor",
        "cta_become_tutor",
        "features",
        "subjects",
        "greeting",
        "session_booked",
        "weekdays",
        "timer_start",
        "timer_pause",
        "timer_reset",
        "timer_remaining",
        "language_label",
        "theme_label",
        "theme_light",
        "theme_dark",
        "footer_rights",
    ];

    /// Look up a value by its string key.
    pub fn get(&self, key: &str) -> Option<TranslationValue> {
        use TranslationValue::{List, Text};

        let value = match key {
            "app_name" => Text(self.app_name),
            "nav_home" => Text(self.nav_home),
            "nav_tutors" => Text(self.nav_tutors),
            "nav_sessions" => Text(self.nav_sessions),
            "nav_profile" => Text(self.nav_profile),
            "nav_logout" => Text(self.nav_logout),
            "hero_title" => Text(self.hero_title),
            "hero_subtitle" => Text(self.hero_subtitle),
            "cta_find_tutor" => Text(self.cta_find_tutor),
            "cta_become_tutor" => Text(self.cta_become_tutor),
            "features" => List(self.features),
            "subjects" => List(self.subjects),
            "greeting" => Text(self.greeting),
            "session_booked" => Text(self.session_booked),
            "weekdays" => List(self.weekdays),
            "timer_start" => Text(self.timer_start),
            "timer_pause" => Text(self.timer_pause),
            "timer_reset" => Text(self.timer_reset),
            "timer_remaining" => Text(self.timer_remaining),
            "language_label" => Text(self.language_label),
            "theme_label" => Text(self.theme_label),
            "theme_light" => Text(self.theme_light),
            "theme_dark" => Text(self.theme_dark),
            "footer_rights" => Text(self.footer_rights),
            _ => return None,
        };
        Some(value)
    }

    /// Iterate `(key, value)` pairs for every key in `KEYS` that resolves.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, TranslationValue)> + '_ {
        Self::KEYS
            .iter()
            .filter_map(move |key| self.get(key).map(|value| (*key, value)))
    }
}

/// Replace `{name}` placeholders in a template.
///
/// Unknown placeholders are left untouched.
pub fn fill_placeholders(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{}}}", name), value)
    })
}

// ==================== French Strings ====================

/// French language strings (default language)
pub static FRENCH_STRINGS: LanguageStrings = LanguageStrings {
    app_name: "Tyala",

    nav_home: "Accueil",
    nav_tutors: "Tuteurs",
    nav_sessions: "Mes séances",
    nav_profile: "Profil",
    nav_logout: "Déconnexion",

    hero_title: "Apprenez avec les meilleurs tuteurs d'Haïti",
    hero_subtitle: "Des cours particuliers en ligne, à votre rythme et dans votre langue.",
    cta_find_tutor: "Trouver un tuteur",
    cta_become_tutor: "Devenir tuteur",

    features: &[
        "Tuteurs vérifiés",
        "Séances en direct par vidéo",
        "Suivi des progrès",
    ],
    subjects: &[
        "Mathématiques",
        "Physique",
        "Chimie",
        "Français",
        "Anglais",
        "Histoire",
    ],

    greeting: "Bonjour, {name} !",

    session_booked: "Séance réservée avec {tutor} le {date}.",
    weekdays: &[
        "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi", "Dimanche",
    ],

    timer_start: "Démarrer",
    timer_pause: "Pause",
    timer_reset: "Réinitialiser",
    timer_remaining: "Temps restant : {minutes} min",

    language_label: "Langue",
    theme_label: "Thème",
    theme_light: "Clair",
    theme_dark: "Sombre",

    footer_rights: "Tous droits réservés.",
};

// ==================== Haitian Creole Strings ====================

/// Haitian Creole language strings
pub static CREOLE_STRINGS: LanguageStrings = LanguageStrings {
    app_name: "Tyala",

    nav_home: "Akèy",
    nav_tutors: "Pwofesè",
    nav_sessions: "Seyans mwen yo",
    nav_profile: "Pwofil",
    nav_logout: "Dekonekte",

    hero_title: "Aprann ak pi bon pwofesè an Ayiti",
    hero_subtitle: "Kou patikilye sou entènèt, nan ritm pa w ak nan lang ou.",
    cta_find_tutor: "Jwenn yon pwofesè",
    cta_become_tutor: "Vin pwofesè",

    features: &[
        "Pwofesè verifye",
        "Seyans an dirèk pa videyo",
        "Swivi pwogrè",
    ],
    subjects: &[
        "Matematik",
        "Fizik",
        "Chimi",
        "Franse",
        "Angle",
        "Istwa",
    ],

    greeting: "Bonjou, {name}!",

    session_booked: "Seyans rezève ak {tutor} pou {date}.",
    weekdays: &[
        "Lendi", "Madi", "Mèkredi", "Jedi", "Vandredi", "Samdi", "Dimanch",
    ],

    timer_start: "Kòmanse",
    timer_pause: "Poz",
    timer_reset: "Rekòmanse",
    timer_remaining: "Tan ki rete : {minutes} min",

    language_label: "Lang",
    theme_label: "Tèm",
    theme_light: "Klè",
    theme_dark: "Fonse",

    footer_rights: "Tout dwa rezève.",
};
