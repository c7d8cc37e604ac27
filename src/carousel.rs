//! Carousel (Swiper) options for the site's sliders.
//!
//! The carousels are pure data: a selector plus the options object handed to
//! `new Swiper(selector, options)` on page load. Options are read from the
//! config file in snake_case and emitted as camelCase JSON, the shape Swiper
//! expects.
//!
//! ```text
//! [[carousels]]                      document.addEventListener("DOMContentLoaded", () => {
//! selector = ".items"          →       new Swiper(".items", { "loop": true, ... });
//! slides_per_view = 4                });
//! ```

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One slider instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct SliderConfig {
    /// CSS selector of the slider container. Not part of the options object.
    #[serde(skip_serializing)]
    pub selector: String,
    #[serde(rename = "loop", default)]
    pub loop_slides: bool,
    /// Transition duration in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub speed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub space_between: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub autoplay: Option<Autoplay>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub navigation: Option<Navigation>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub slides_per_view: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub slides_per_group: Option<u32>,
    /// Viewport-width overrides, emitted as `{ "<min width>": { ... } }`.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "breakpoints_as_map"
    )]
    pub breakpoints: Vec<Breakpoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Autoplay {
    /// Delay between transitions in milliseconds.
    pub delay: u32,
    #[serde(default)]
    pub disable_on_interaction: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pause_on_mouse_enter: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Navigation {
    pub next_el: String,
    pub prev_el: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Pagination {
    pub el: String,
    #[serde(default)]
    pub clickable: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dynamic_bullets: Option<bool>,
}

/// Options applied from a viewport width upwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct Breakpoint {
    /// Minimum viewport width in CSS pixels. Emitted as the map key.
    #[serde(skip_serializing)]
    pub min_width: u32,
    pub slides_per_view: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub slides_per_group: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub space_between: Option<u32>,
}

fn breakpoints_as_map<S: Serializer>(
    breakpoints: &[Breakpoint],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(breakpoints.len()))?;
    for bp in breakpoints {
        map.serialize_entry(&bp.min_width, bp)?;
    }
    map.end()
}

impl SliderConfig {
    /// Check the values Swiper would silently misbehave on.
    pub fn validate(&self) -> Result<(), String> {
        if self.selector.trim().is_empty() {
            return Err("carousel selector must not be empty".into());
        }
        if self.slides_per_view == Some(0) || self.slides_per_group == Some(0) {
            return Err(format!(
                "carousel {}: slides per view/group must be non-zero",
                self.selector
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for bp in &self.breakpoints {
            if bp.slides_per_view == 0 || bp.slides_per_group == Some(0) {
                return Err(format!(
                    "carousel {}: breakpoint {} has zero slides",
                    self.selector, bp.min_width
                ));
            }
            if !seen.insert(bp.min_width) {
                return Err(format!(
                    "carousel {}: duplicate breakpoint {}",
                    self.selector, bp.min_width
                ));
            }
        }
        Ok(())
    }

    /// The options object as pretty-printed JSON.
    pub fn options_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// The two sliders used on the site.
pub fn stock_carousels() -> Vec<SliderConfig> {
    vec![
        SliderConfig {
            selector: ".items".to_string(),
            loop_slides: true,
            speed: Some(800),
            space_between: None,
            autoplay: Some(Autoplay {
                delay: 2000,
                disable_on_interaction: false,
                pause_on_mouse_enter: None,
            }),
            navigation: None,
            pagination: Some(Pagination {
                el: ".swiper-pagination".to_string(),
                clickable: true,
                dynamic_bullets: None,
            }),
            slides_per_view: Some(4),
            slides_per_group: Some(4),
            breakpoints: [(1024, 3), (600, 2), (480, 1)]
                .into_iter()
                .map(|(min_width, n)| Breakpoint {
                    min_width,
                    slides_per_view: n,
                    slides_per_group: Some(n),
                    space_between: None,
                })
                .collect(),
        },
        SliderConfig {
            selector: ".references-swiper".to_string(),
            loop_slides: true,
            speed: Some(800),
            space_between: Some(0),
            autoplay: Some(Autoplay {
                delay: 5000,
                disable_on_interaction: false,
                pause_on_mouse_enter: Some(true),
            }),
            navigation: Some(Navigation {
                next_el: ".swiper-button-next".to_string(),
                prev_el: ".swiper-button-prev".to_string(),
            }),
            pagination: Some(Pagination {
                el: ".swiper-pagination".to_string(),
                clickable: true,
                dynamic_bullets: Some(true),
            }),
            slides_per_view: None,
            slides_per_group: None,
            breakpoints: [(320, 1), (768, 2), (1024, 3)]
                .into_iter()
                .map(|(min_width, n)| Breakpoint {
                    min_width,
                    slides_per_view: n,
                    slides_per_group: None,
                    space_between: Some(0),
                })
                .collect(),
        },
    ]
}

/// Render the browser init script constructing every slider on page load.
pub fn render_init_script(sliders: &[SliderConfig]) -> serde_json::Result<String> {
    let mut out = String::from("document.addEventListener(\"DOMContentLoaded\", () => {\n");
    for (i, slider) in sliders.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let options = slider.options_json()?;
        let selector = serde_json::to_string(&slider.selector)?;
        out.push_str(&format!(
            "  new Swiper({}, {});\n",
            selector,
            indent_continuation(&options, "  ")
        ));
    }
    out.push_str("});\n");
    Ok(out)
}

/// Indent every line after the first.
fn indent_continuation(text: &str, prefix: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn options(slider: &SliderConfig) -> Value {
        serde_json::from_str(&slider.options_json().unwrap()).unwrap()
    }

    #[test]
    fn stock_items_slider_options() {
        let sliders = stock_carousels();
        assert_eq!(
            options(&sliders[0]),
            json!({
                "loop": true,
                "speed": 800,
                "autoplay": { "delay": 2000, "disableOnInteraction": false },
                "pagination": { "el": ".swiper-pagination", "clickable": true },
                "slidesPerView": 4,
                "slidesPerGroup": 4,
                "breakpoints": {
                    "1024": { "slidesPerView": 3, "slidesPerGroup": 3 },
                    "600": { "slidesPerView": 2, "slidesPerGroup": 2 },
                    "480": { "slidesPerView": 1, "slidesPerGroup": 1 }
                }
            })
        );
    }

    #[test]
    fn stock_references_slider_options() {
        let sliders = stock_carousels();
        assert_eq!(
            options(&sliders[1]),
            json!({
                "loop": true,
                "speed": 800,
                "spaceBetween": 0,
                "autoplay": {
                    "delay": 5000,
                    "disableOnInteraction": false,
                    "pauseOnMouseEnter": true
                },
                "navigation": {
                    "nextEl": ".swiper-button-next",
                    "prevEl": ".swiper-button-prev"
                },
                "pagination": {
                    "el": ".swiper-pagination",
                    "clickable": true,
                    "dynamicBullets": true
                },
                "breakpoints": {
                    "320": { "slidesPerView": 1, "spaceBetween": 0 },
                    "768": { "slidesPerView": 2, "spaceBetween": 0 },
                    "1024": { "slidesPerView": 3, "spaceBetween": 0 }
                }
            })
        );
    }

    #[test]
    fn selector_is_not_an_option() {
        let json = stock_carousels()[0].options_json().unwrap();
        assert!(!json.contains("selector"));
        assert!(!json.contains(".items"));
    }

    #[test]
    fn breakpoints_keep_configured_order() {
        let json = stock_carousels()[0].options_json().unwrap();
        let a = json.find("\"1024\"").unwrap();
        let b = json.find("\"600\"").unwrap();
        let c = json.find("\"480\"").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn stock_sliders_validate() {
        for slider in stock_carousels() {
            slider.validate().unwrap();
        }
    }

    #[test]
    fn validate_rejects_empty_selector() {
        let mut slider = stock_carousels().remove(0);
        slider.selector = "  ".to_string();
        assert!(slider.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_slides() {
        let mut slider = stock_carousels().remove(0);
        slider.breakpoints[1].slides_per_view = 0;
        let err = slider.validate().unwrap_err();
        assert!(err.contains("600"), "{err}");
    }

    #[test]
    fn validate_rejects_duplicate_breakpoint() {
        let mut slider = stock_carousels().remove(1);
        slider.breakpoints[2].min_width = 320;
        assert!(slider.validate().unwrap_err().contains("duplicate"));
    }

    #[test]
    fn parse_from_toml_snake_case() {
        let toml = r#"
selector = ".gallery"
loop = false
slides_per_view = 2

[pagination]
el = ".dots"
clickable = true

[[breakpoints]]
min_width = 900
slides_per_view = 3
space_between = 16
"#;
        let slider: SliderConfig = toml::from_str(toml).unwrap();
        assert_eq!(slider.selector, ".gallery");
        assert!(!slider.loop_slides);
        assert_eq!(slider.breakpoints[0].min_width, 900);
        assert_eq!(
            options(&slider),
            json!({
                "loop": false,
                "pagination": { "el": ".dots", "clickable": true },
                "slidesPerView": 2,
                "breakpoints": { "900": { "slidesPerView": 3, "spaceBetween": 16 } }
            })
        );
    }

    #[test]
    fn parse_rejects_camel_case_keys() {
        let toml = r#"
selector = ".gallery"
slidesPerView = 2
"#;
        assert!(toml::from_str::<SliderConfig>(toml).is_err());
    }

    #[test]
    fn init_script_constructs_each_slider() {
        let script = render_init_script(&stock_carousels()).unwrap();
        assert!(script.starts_with("document.addEventListener(\"DOMContentLoaded\", () => {"));
        assert!(script.contains("new Swiper(\".items\", {"));
        assert!(script.contains("new Swiper(\".references-swiper\", {"));
        assert!(script.trim_end().ends_with("});"));
        assert_eq!(script.matches("new Swiper(").count(), 2);
    }

    #[test]
    fn init_script_empty_list() {
        let script = render_init_script(&[]).unwrap();
        assert_eq!(
            script,
            "document.addEventListener(\"DOMContentLoaded\", () => {\n});\n"
        );
    }
}
