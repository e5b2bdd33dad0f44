use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use super::api::VenueApi;
use crate::i18n::Language;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameTexts {
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub texts: HashMap<String, GameTexts>,
    #[serde(default)]
    pub game_genre: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub outside: bool,
    #[serde(default)]
    pub max_players_count: Option<u32>,
}

impl Game {
    /// Texts in `lang`, falling back to English, then to empty texts.
    pub fn texts(&self, lang: Language) -> GameTexts {
        self.texts
            .get(lang.tag())
            .or_else(|| self.texts.get(Language::En.tag()))
            .cloned()
            .unwrap_or_default()
    }

    pub fn genres(&self, lang: Language) -> Vec<String> {
        self.game_genre
            .get(lang.tag())
            .or_else(|| self.game_genre.get(Language::En.tag()))
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GamesResponse {
    pub data: Vec<Game>,
}

/// Catalog shown when `/games` cannot be reached.
pub fn mock_games() -> Vec<Game> {
    let texts = |preview: &str, description: &str| GameTexts {
        preview: preview.to_string(),
        description: description.to_string(),
    };
    let genres = |list: &[&str]| list.iter().map(|g| g.to_string()).collect::<Vec<_>>();

    vec![Game {
        name: "VR Shooter".into(),
        image: "https://miro.medium.com/v2/resize:fit:1400/1*2MTeG3JJhQtbyUXmLzIniw.png".into(),
        images: vec![
            "https://c4.wallpaperflare.com/wallpaper/519/347/693/5bd106835c103-wallpaper-preview.jpg".into(),
            "https://escapehunt.com/wp-content/uploads/sites/70/2020/10/EH-Survival-Local-Game-Hero.jpg".into(),
        ],
        videos: vec!["https://www.youtube.com/embed/dQw4w9WgXcQ".into()],
        texts: HashMap::from([
            ("en".to_string(), texts("Cool Shooter", "Full game description")),
            ("de".to_string(), texts("Cooler Shooter", "Vollständige Spielbeschreibung")),
            ("ru".to_string(), texts("Крутой шутер", "Полное описание игры")),
        ]),
        game_genre: HashMap::from([
            ("en".to_string(), genres(&["shooter", "action"])),
            ("de".to_string(), genres(&["shooter", "aktion"])),
            ("ru".to_string(), genres(&["стрелялка", "экшн"])),
        ]),
        age: Some(8),
        outside: false,
        max_players_count: Some(4),
    }]
}

/// Loads the catalog, substituting the mock catalog on failure.
pub async fn load_games(api: &VenueApi) -> Vec<Game> {
    match api.list_games().await {
        Ok(games) => games,
        Err(err) => {
            warn!("Error fetching games, using mock data: {}", err);
            mock_games()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texts_fall_back_to_english() {
        let mut game = mock_games().remove(0);
        game.texts.remove("ru");
        assert_eq!(game.texts(Language::Ru).preview, "Cool Shooter");
        assert_eq!(game.texts(Language::De).preview, "Cooler Shooter");
        assert_eq!(game.genres(Language::De), vec!["shooter", "aktion"]);

        game.texts.clear();
        assert_eq!(game.texts(Language::En), GameTexts::default());
    }

    #[test]
    fn catalog_response_tolerates_sparse_games() {
        let body = r#"{"data": [{"name": "Zombie Escape", "outside": true}]}"#;
        let response: GamesResponse = serde_json::from_str(body).unwrap();
        let game = &response.data[0];
        assert_eq!(game.name, "Zombie Escape");
        assert!(game.outside);
        assert!(game.images.is_empty());
        assert_eq!(game.max_players_count, None);
    }
}
