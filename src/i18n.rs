use leptos::prelude::*;

/// Key the chosen language is persisted under.
pub const LANGUAGE_STORAGE_KEY: &str = "i18nextLng";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    De,
    Ru,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::De, Language::Ru];

    /// Accepts bare or regional tags (`de`, `de-CH`). Unknown tags are None.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "de" => Some(Language::De),
            "ru" => Some(Language::Ru),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
            Language::Ru => "ru",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::De => "Deutsch",
            Language::Ru => "Русский",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    NavHome,
    NavGames,
    NavBooking,
    HeroTitle,
    HeroSubtitle,
    BookNow,
    FreeHoursToday,
    BookYourSlot,
    LocationName,
    Hour,
    FullName,
    Email,
    Phone,
    BookingDescription,
    NotesDescription,
    YourBooking,
    EstimatedPrice,
    ConfirmBooking,
    BookingSuccess,
    Loading,
    PreviousDay,
    NextDay,
    NameRequired,
    ContactRequired,
    SelectTimeSlots,
    InvalidEmail,
    BookingError,
    BookOutbound,
    OutboundTitle,
    Inside,
    Outside,
    DevicesCount,
    Address,
    Close,
    Games,
    Age,
    Players,
    InsideGame,
    OutsideGame,
    Back,
    GameNotFound,
    OpeningHours,
    FooterRights,
}

pub fn translate(lang: Language, text: Text) -> &'static str {
    use Language::*;
    use Text::*;

    match (text, lang) {
        (NavHome, En) => "Home",
        (NavHome, De) => "Start",
        (NavHome, Ru) => "Главная",
        (NavGames, En) => "Games",
        (NavGames, De) => "Spiele",
        (NavGames, Ru) => "Игры",
        (NavBooking, En) => "Booking",
        (NavBooking, De) => "Buchung",
        (NavBooking, Ru) => "Бронирование",
        (HeroTitle, En) => "Step into virtual reality",
        (HeroTitle, De) => "Tauche ein in die virtuelle Realität",
        (HeroTitle, Ru) => "Погрузитесь в виртуальную реальность",
        (HeroSubtitle, En) => "Free-roam VR arena for friends, families and teams",
        (HeroSubtitle, De) => "Free-Roam-VR-Arena für Freunde, Familien und Teams",
        (HeroSubtitle, Ru) => "VR-арена свободного перемещения для друзей, семей и команд",
        (BookNow, En) => "Book now",
        (BookNow, De) => "Jetzt buchen",
        (BookNow, Ru) => "Забронировать",
        (FreeHoursToday, En) => "Free hours today",
        (FreeHoursToday, De) => "Freie Stunden heute",
        (FreeHoursToday, Ru) => "Свободных часов сегодня",
        (BookYourSlot, En) => "Book your slot",
        (BookYourSlot, De) => "Buche deinen Slot",
        (BookYourSlot, Ru) => "Забронируйте время",
        (LocationName, En) => "VR Arena, main hall",
        (LocationName, De) => "VR Arena, Haupthalle",
        (LocationName, Ru) => "VR Arena, главный зал",
        (Hour, En) => "hour",
        (Hour, De) => "Stunde",
        (Hour, Ru) => "час",
        (FullName, En) => "Full name",
        (FullName, De) => "Vollständiger Name",
        (FullName, Ru) => "Полное имя",
        (Email, En) => "Email",
        (Email, De) => "E-Mail",
        (Email, Ru) => "Эл. почта",
        (Phone, En) => "Phone",
        (Phone, De) => "Telefon",
        (Phone, Ru) => "Телефон",
        (BookingDescription, En) => "Notes for your booking",
        (BookingDescription, De) => "Anmerkungen zur Buchung",
        (BookingDescription, Ru) => "Комментарий к бронированию",
        (NotesDescription, En) => "Tell us about the occasion, the number of players or anything we should prepare.",
        (NotesDescription, De) => "Erzähl uns vom Anlass, der Spieleranzahl oder was wir vorbereiten sollen.",
        (NotesDescription, Ru) => "Расскажите о поводе, количестве игроков или о том, что нам подготовить.",
        (YourBooking, En) => "Your booking",
        (YourBooking, De) => "Deine Buchung",
        (YourBooking, Ru) => "Ваше бронирование",
        (EstimatedPrice, En) => "Estimated price",
        (EstimatedPrice, De) => "Voraussichtlicher Preis",
        (EstimatedPrice, Ru) => "Ориентировочная цена",
        (ConfirmBooking, En) => "Confirm booking",
        (ConfirmBooking, De) => "Buchung bestätigen",
        (ConfirmBooking, Ru) => "Подтвердить бронирование",
        (BookingSuccess, En) => "Booked!",
        (BookingSuccess, De) => "Gebucht!",
        (BookingSuccess, Ru) => "Забронировано!",
        (Loading, En) => "Loading...",
        (Loading, De) => "Wird geladen...",
        (Loading, Ru) => "Загрузка...",
        (PreviousDay, En) => "Previous day",
        (PreviousDay, De) => "Vorheriger Tag",
        (PreviousDay, Ru) => "Предыдущий день",
        (NextDay, En) => "Next day",
        (NextDay, De) => "Nächster Tag",
        (NextDay, Ru) => "Следующий день",
        (NameRequired, En) => "Please enter your full name.",
        (NameRequired, De) => "Bitte gib deinen vollständigen Namen ein.",
        (NameRequired, Ru) => "Пожалуйста, введите полное имя.",
        (ContactRequired, En) => "Please enter an email address or a phone number.",
        (ContactRequired, De) => "Bitte gib eine E-Mail-Adresse oder Telefonnummer an.",
        (ContactRequired, Ru) => "Пожалуйста, укажите эл. почту или телефон.",
        (SelectTimeSlots, En) => "Please select at least one time slot.",
        (SelectTimeSlots, De) => "Bitte wähle mindestens einen Zeitslot.",
        (SelectTimeSlots, Ru) => "Пожалуйста, выберите хотя бы одно время.",
        (InvalidEmail, En) => "Please enter a valid email address.",
        (InvalidEmail, De) => "Bitte gib eine gültige E-Mail-Adresse ein.",
        (InvalidEmail, Ru) => "Пожалуйста, введите корректный адрес эл. почты.",
        (BookingError, En) => "The booking could not be completed. Please try again.",
        (BookingError, De) => "Die Buchung konnte nicht abgeschlossen werden. Bitte versuche es erneut.",
        (BookingError, Ru) => "Не удалось оформить бронирование. Попробуйте ещё раз.",
        (BookOutbound, En) => "Book VR at your location",
        (BookOutbound, De) => "VR bei dir vor Ort buchen",
        (BookOutbound, Ru) => "Заказать VR на выезд",
        (OutboundTitle, En) => "Mobile VR booking",
        (OutboundTitle, De) => "Mobile VR-Buchung",
        (OutboundTitle, Ru) => "Выездное бронирование VR",
        (Inside, En) => "Indoor",
        (Inside, De) => "Drinnen",
        (Inside, Ru) => "В помещении",
        (Outside, En) => "Outdoor",
        (Outside, De) => "Draußen",
        (Outside, Ru) => "На улице",
        (DevicesCount, En) => "Number of headsets",
        (DevicesCount, De) => "Anzahl der Headsets",
        (DevicesCount, Ru) => "Количество шлемов",
        (Address, En) => "Address",
        (Address, De) => "Adresse",
        (Address, Ru) => "Адрес",
        (Close, En) => "Close",
        (Close, De) => "Schließen",
        (Close, Ru) => "Закрыть",
        (Games, En) => "Games",
        (Games, De) => "Spiele",
        (Games, Ru) => "Игры",
        (Age, En) => "Age",
        (Age, De) => "Alter",
        (Age, Ru) => "Возраст",
        (Players, En) => "Players",
        (Players, De) => "Spieler",
        (Players, Ru) => "Игроки",
        (InsideGame, En) => "Indoor game",
        (InsideGame, De) => "Indoor-Spiel",
        (InsideGame, Ru) => "Игра в помещении",
        (OutsideGame, En) => "Outdoor game",
        (OutsideGame, De) => "Outdoor-Spiel",
        (OutsideGame, Ru) => "Игра на улице",
        (Back, En) => "Back",
        (Back, De) => "Zurück",
        (Back, Ru) => "Назад",
        (GameNotFound, En) => "Game not found.",
        (GameNotFound, De) => "Spiel nicht gefunden.",
        (GameNotFound, Ru) => "Игра не найдена.",
        (OpeningHours, En) => "Open daily 10:00-22:00",
        (OpeningHours, De) => "Täglich geöffnet 10:00-22:00",
        (OpeningHours, Ru) => "Ежедневно 10:00-22:00",
        (FooterRights, En) => "All rights reserved.",
        (FooterRights, De) => "Alle Rechte vorbehalten.",
        (FooterRights, Ru) => "Все права защищены.",
    }
}

/// Somewhere a small string preference survives between visits.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
}

/// `window.localStorage`, with the browser language as a read fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    pub fn navigator_language() -> Option<String> {
        web_sys::window()?.navigator().language()
    }
}

impl PreferenceStore for BrowserStorage {
    fn load(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn save(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("Could not persist preference '{}'", key);
            }
        }
    }
}

/// Language chosen by the visitor, read once from the store and written
/// back on every change.
#[derive(Debug)]
pub struct LanguagePreference<P> {
    store: P,
    current: Language,
}

impl<P: PreferenceStore> LanguagePreference<P> {
    /// Stored choice first, then the detected tag, then `default`.
    pub fn read_at_init(store: P, detected: Option<&str>, default: Language) -> Self {
        let current = store
            .load(LANGUAGE_STORAGE_KEY)
            .and_then(|tag| Language::from_tag(&tag))
            .or_else(|| detected.and_then(Language::from_tag))
            .unwrap_or(default);
        Self { store, current }
    }

    pub fn current(&self) -> Language {
        self.current
    }

    pub fn update(&mut self, lang: Language) {
        self.current = lang;
        self.store.save(LANGUAGE_STORAGE_KEY, lang.tag());
    }
}

/// Reactive handle to the active language, shared through context.
#[derive(Debug, Clone, Copy)]
pub struct I18n {
    language: RwSignal<Language>,
}

impl I18n {
    pub fn language(&self) -> Language {
        self.language.get()
    }

    pub fn t(&self, text: Text) -> &'static str {
        translate(self.language.get(), text)
    }

    /// Switches language and persists the choice.
    pub fn set_language(&self, lang: Language) {
        let mut preference = LanguagePreference {
            store: BrowserStorage,
            current: self.language.get_untracked(),
        };
        preference.update(lang);
        self.language.set(lang);
    }
}

/// Provides `I18n` with `default` and, once running in the browser, swaps
/// in the stored or detected language.
pub fn provide_i18n(default: Language) -> I18n {
    let i18n = I18n {
        language: RwSignal::new(default),
    };
    provide_context(i18n);

    Effect::new(move |_| {
        let detected = BrowserStorage::navigator_language();
        let preference = LanguagePreference::read_at_init(BrowserStorage, detected.as_deref(), default);
        i18n.language.set(preference.current());
    });

    i18n
}

pub fn use_i18n() -> I18n {
    use_context::<I18n>().unwrap_or_else(|| I18n {
        language: RwSignal::new(Language::En),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Default)]
    struct MemoryStore {
        values: Mutex<HashMap<String, String>>,
    }

    impl PreferenceStore for MemoryStore {
        fn load(&self, key: &str) -> Option<String> {
            self.values.lock().ok()?.get(key).cloned()
        }

        fn save(&self, key: &str, value: &str) {
            if let Ok(mut values) = self.values.lock() {
                values.insert(key.to_string(), value.to_string());
            }
        }
    }

    #[test]
    fn tags_are_normalised() {
        assert_eq!(Language::from_tag("de-CH"), Some(Language::De));
        assert_eq!(Language::from_tag("RU"), Some(Language::Ru));
        assert_eq!(Language::from_tag("en_GB"), Some(Language::En));
        assert_eq!(Language::from_tag("fr"), None);
        assert_eq!(Language::from_tag(""), None);
    }

    #[test]
    fn stored_choice_wins_over_detection() {
        let store = MemoryStore::default();
        store.save(LANGUAGE_STORAGE_KEY, "ru");
        let preference = LanguagePreference::read_at_init(store, Some("en-US"), Language::De);
        assert_eq!(preference.current(), Language::Ru);
    }

    #[test]
    fn detection_then_default() {
        let preference = LanguagePreference::read_at_init(MemoryStore::default(), Some("en-US"), Language::De);
        assert_eq!(preference.current(), Language::En);

        let preference = LanguagePreference::read_at_init(MemoryStore::default(), Some("fr"), Language::De);
        assert_eq!(preference.current(), Language::De);
    }

    #[test]
    fn update_persists() {
        let mut preference = LanguagePreference::read_at_init(MemoryStore::default(), None, Language::De);
        preference.update(Language::En);
        assert_eq!(preference.current(), Language::En);
        assert_eq!(preference.store.load(LANGUAGE_STORAGE_KEY).as_deref(), Some("en"));
    }

    #[test]
    fn every_text_is_translated_in_every_language() {
        for lang in Language::ALL {
            assert!(!translate(lang, Text::ConfirmBooking).is_empty());
            assert!(!translate(lang, Text::InvalidEmail).is_empty());
        }
        assert_ne!(
            translate(Language::De, Text::BookNow),
            translate(Language::En, Text::BookNow)
        );
    }
}
