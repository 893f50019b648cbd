//! Known object ids of the match template.

use serde::{Deserialize, Serialize};

use crate::requests::{ImageReplaceMethod, PredefinedLayout};

/// Placeholder ids and labels of the template deck.
///
/// Defaults describe the production template; each field can be overridden
/// from the run configuration when the template changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateLayout {
    /// Text box that receives `"<home> vs <away>"`
    pub headline_box: String,
    /// Text box that receives `"<championship> - <date>"`
    pub subtitle_box: String,
    /// Slide appended to the deck by every run
    pub appended_slide: String,
    pub appended_slide_layout: PredefinedLayout,
    pub home_logo: String,
    pub away_logo: String,
    pub logo_replace_method: ImageReplaceMethod,
    /// Slide holding the timer that gets duplicated
    pub timer_source_slide: String,
    /// Id requested for the duplicate
    pub timer_copy_slide: String,
    /// Label (alt-text title) of the timer box inside the slide
    pub timer_label: String,
    /// Text written into the duplicated timer box
    pub timer_text: String,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            headline_box: "p2_i7171".to_string(),
            subtitle_box: "p2_i7172".to_string(),
            appended_slide: "summary_slide".to_string(),
            appended_slide_layout: PredefinedLayout::Blank,
            home_logo: "p2_i7173".to_string(),
            away_logo: "p2_i7174".to_string(),
            logo_replace_method: ImageReplaceMethod::CenterInside,
            timer_source_slide: "p7".to_string(),
            timer_copy_slide: "p7_copy1".to_string(),
            timer_label: "Timer 1/4".to_string(),
            timer_text: "25:00".to_string(),
        }
    }
}

impl TemplateLayout {
    /// Ids the template document already contains.
    pub fn existing_ids(&self) -> Vec<&str> {
        vec![
            self.headline_box.as_str(),
            self.subtitle_box.as_str(),
            self.home_logo.as_str(),
            self.away_logo.as_str(),
            self.timer_source_slide.as_str(),
        ]
    }
}
