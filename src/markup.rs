//! The `data-*` attribute contract between page markup and the engine.
//!
//! Markup opts elements into effects declaratively:
//!
//! | Attribute | Values | Effect |
//! |-----------|--------|--------|
//! | `data-animate-direction` | `up down left right in out` | one-shot reveal |
//! | `data-animate-delay` | seconds | reveal delay |
//! | `data-animate-duration` | seconds | reveal duration override |
//! | `data-animate-group` | any id | stagger with same-id siblings |
//! | `data-animate-stagger` | seconds | group stagger (first member wins) |
//! | `data-parallax` | `none low medium high` | scroll parallax |
//! | `data-depth` | `background mid foreground ui` | parallax depth factor |
//! | `data-float` | `none low medium high` | zero-gravity floating |
//! | `data-layer` | number | pointer parallax depth |
//! | `data-idle-element` | any id | joins the idle scatter |
//! | `data-idle-drift` / `-rotation` / `-scale` | numbers | scatter ranges |
//!
//! Unknown or malformed values fall back to defaults with a warning; they
//! are never errors.

use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::util::secs;

/// Reveal direction attribute.
pub const ANIMATE_DIRECTION: &str = "data-animate-direction";
/// Reveal delay attribute (seconds).
pub const ANIMATE_DELAY: &str = "data-animate-delay";
/// Reveal duration attribute (seconds).
pub const ANIMATE_DURATION: &str = "data-animate-duration";
/// Reveal group attribute.
pub const ANIMATE_GROUP: &str = "data-animate-group";
/// Reveal group stagger attribute (seconds).
pub const ANIMATE_STAGGER: &str = "data-animate-stagger";
/// Scroll parallax level attribute.
pub const PARALLAX: &str = "data-parallax";
/// Parallax depth attribute.
pub const DEPTH: &str = "data-depth";
/// Float level attribute.
pub const FLOAT: &str = "data-float";
/// Pointer parallax layer depth attribute.
pub const LAYER: &str = "data-layer";
/// Idle scatter membership attribute.
pub const IDLE_ELEMENT: &str = "data-idle-element";
/// Idle scatter maximum drift distance (pixels).
pub const IDLE_DRIFT: &str = "data-idle-drift";
/// Idle scatter maximum rotation (degrees).
pub const IDLE_ROTATION: &str = "data-idle-rotation";
/// Idle scatter minimum scale.
pub const IDLE_SCALE: &str = "data-idle-scale";
/// Hero section root (turn-on target).
pub const HERO_ROOT: &str = "data-hero-root";
/// Hero background (turn-on glow target).
pub const HERO_BACKGROUND: &str = "data-hero-background";
/// Hero content wrapper.
pub const HERO_CONTENT: &str = "data-hero-turnon-content";
/// Set on the hero root once the turn-on completes.
pub const HERO_COMPLETE: &str = "data-hero-turnon-complete";

/// Read access to an element's attributes.
pub trait AttributeSource {
    /// Value of `name`, or `None` if the attribute is absent.
    fn attribute(&self, name: &str) -> Option<String>;
}

impl AttributeSource for [(&str, &str)] {
    fn attribute(&self, name: &str) -> Option<String> {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| (*value).to_owned())
    }
}

impl<S: BuildHasher> AttributeSource for HashMap<String, String, S> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// An attribute value that matches no known keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue {
    /// Attribute the value came from.
    pub attribute: &'static str,
    /// The rejected value.
    pub value: String,
}

impl fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} value '{}'", self.attribute, self.value)
    }
}

impl std::error::Error for UnknownValue {}

/// Declares a keyword enum parsed from one attribute.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $attr:expr,
        { $( $(#[$vmeta:meta])* $variant:ident => $kw:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
            Serialize, Deserialize,
        )]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The markup keyword.
            #[must_use]
            pub const fn keyword(self) -> &'static str {
                match self {
                    $(Self::$variant => $kw,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($kw => Ok(Self::$variant),)+
                    other => Err(UnknownValue {
                        attribute: $attr,
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

keyword_enum! {
    /// Where a reveal starts from.
    RevealDirection, ANIMATE_DIRECTION, {
        /// Slides up into place from below.
        #[default]
        Up => "up",
        /// Slides down into place from above.
        Down => "down",
        /// Slides in from the left.
        Left => "left",
        /// Slides in from the right.
        Right => "right",
        /// Zooms in from smaller.
        In => "in",
        /// Zooms out from larger.
        Out => "out",
    }
}

keyword_enum! {
    /// Scroll parallax intensity.
    ParallaxLevel, PARALLAX, {
        /// No parallax.
        #[default]
        None => "none",
        /// Subtle movement.
        Low => "low",
        /// Moderate movement.
        Medium => "medium",
        /// Strong movement.
        High => "high",
    }
}

keyword_enum! {
    /// Layer an element sits on, scaling its parallax.
    DepthLevel, DEPTH, {
        /// Starfield, nebula, deep gradients.
        Background => "background",
        /// Main sections.
        #[default]
        Mid => "mid",
        /// Key text, CTAs, cards.
        Foreground => "foreground",
        /// Header and overlays; never moves.
        Ui => "ui",
    }
}

keyword_enum! {
    /// Zero-gravity float intensity.
    FloatLevel, FLOAT, {
        /// No floating.
        #[default]
        None => "none",
        /// Tiny motion for text.
        Low => "low",
        /// Icons, badges, cards.
        Medium => "medium",
        /// Decorative background elements.
        High => "high",
    }
}

/// Parse a keyword attribute, warning and defaulting on bad values.
fn keyword<T>(src: &(impl AttributeSource + ?Sized), name: &str) -> Option<T>
where
    T: FromStr<Err = UnknownValue> + Default,
{
    let raw = src.attribute(name)?;
    Some(raw.parse().unwrap_or_else(|e: UnknownValue| {
        log::warn!("{e}, using default");
        T::default()
    }))
}

/// Parse a numeric attribute. Malformed values are treated as absent.
fn number(src: &(impl AttributeSource + ?Sized), name: &str) -> Option<f32> {
    let raw = src.attribute(name)?;
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            log::warn!("malformed {name} value '{raw}', ignoring");
            None
        }
    }
}

/// Reveal parameters read from an element's attributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RevealDescriptor {
    /// Direction the element enters from.
    pub direction: RevealDirection,
    /// Explicit delay before the reveal starts.
    pub delay: Duration,
    /// Duration override; `None` uses the direction's preset.
    pub duration: Option<Duration>,
    /// Stagger group id.
    pub group: Option<String>,
    /// Stagger interval declared on this element.
    pub stagger: Option<Duration>,
}

impl RevealDescriptor {
    /// Read a descriptor. `None` if the element has no reveal direction.
    #[must_use]
    pub fn from_attributes(src: &(impl AttributeSource + ?Sized)) -> Option<Self> {
        let direction = keyword(src, ANIMATE_DIRECTION)?;
        Some(Self {
            direction,
            delay: number(src, ANIMATE_DELAY).map_or(Duration::ZERO, secs),
            duration: number(src, ANIMATE_DURATION).map(secs),
            group: src
                .attribute(ANIMATE_GROUP)
                .filter(|g| !g.trim().is_empty()),
            stagger: number(src, ANIMATE_STAGGER).map(secs),
        })
    }
}

/// Scroll parallax binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ParallaxBinding {
    /// Intensity level.
    pub level: ParallaxLevel,
    /// Depth layer.
    pub depth: DepthLevel,
}

/// Per-element overrides for the idle scatter ranges.
///
/// Distance is drawn from `drift / 2 ..= drift`, rotation from
/// `-rotation ..= rotation`, and scale from `scale ..= min(scale + 0.03, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IdleEffectConfig {
    /// Maximum drift distance in pixels.
    pub drift: f32,
    /// Maximum absolute rotation in degrees.
    pub rotation: f32,
    /// Minimum scale.
    pub scale: f32,
}

/// Idle scatter membership.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdleMembership {
    /// Id given in the markup.
    pub name: String,
    /// Range overrides, if the markup declared a drift distance.
    pub config: Option<IdleEffectConfig>,
}

/// Everything the engine needs to know about one element.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ElementMarkup {
    /// Reveal parameters.
    pub reveal: Option<RevealDescriptor>,
    /// Scroll parallax, if the level is not `none`.
    pub parallax: Option<ParallaxBinding>,
    /// Pointer parallax layer depth.
    pub layer_depth: Option<f32>,
    /// Float intensity.
    pub float: FloatLevel,
    /// Idle scatter membership.
    pub idle: Option<IdleMembership>,
}

impl ElementMarkup {
    /// Read every effect attribute of an element.
    #[must_use]
    pub fn from_attributes(src: &(impl AttributeSource + ?Sized)) -> Self {
        let parallax = keyword::<ParallaxLevel>(src, PARALLAX)
            .filter(|level| *level != ParallaxLevel::None)
            .map(|level| ParallaxBinding {
                level,
                depth: keyword(src, DEPTH).unwrap_or_default(),
            });

        let idle = src.attribute(IDLE_ELEMENT).map(|name| IdleMembership {
            name,
            config: number(src, IDLE_DRIFT).map(|drift| IdleEffectConfig {
                drift,
                rotation: number(src, IDLE_ROTATION).unwrap_or(2.0),
                scale: number(src, IDLE_SCALE).unwrap_or(0.95),
            }),
        });

        Self {
            reveal: RevealDescriptor::from_attributes(src),
            parallax,
            layer_depth: src
                .attribute(LAYER)
                .map(|_| number(src, LAYER).unwrap_or(1.0)),
            float: keyword(src, FLOAT).unwrap_or_default(),
            idle,
        }
    }

    /// Whether the element takes part in any effect.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.reveal.is_some()
            || self.parallax.is_some()
            || self.layer_depth.is_some()
            || self.float != FloatLevel::None
            || self.idle.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_reveal_attributes() {
        let attrs: &[(&str, &str)] = &[
            (ANIMATE_DIRECTION, "left"),
            (ANIMATE_DELAY, "0.2"),
            (ANIMATE_GROUP, "cards"),
            (ANIMATE_STAGGER, "0.05"),
        ];
        let reveal = RevealDescriptor::from_attributes(attrs).unwrap();
        assert_eq!(reveal.direction, RevealDirection::Left);
        assert_eq!(reveal.delay, Duration::from_millis(200));
        assert_eq!(reveal.duration, None);
        assert_eq!(reveal.group.as_deref(), Some("cards"));
        assert_eq!(reveal.stagger, Some(Duration::from_millis(50)));
    }

    #[test]
    fn malformed_values_fall_back() {
        let attrs: &[(&str, &str)] = &[
            (ANIMATE_DIRECTION, "sideways"),
            (ANIMATE_DELAY, "soon"),
            (PARALLAX, "medium"),
            (DEPTH, "basement"),
            (FLOAT, "extreme"),
        ];
        let markup = ElementMarkup::from_attributes(attrs);
        let reveal = markup.reveal.unwrap();
        assert_eq!(reveal.direction, RevealDirection::Up);
        assert_eq!(reveal.delay, Duration::ZERO);
        assert_eq!(
            markup.parallax,
            Some(ParallaxBinding {
                level: ParallaxLevel::Medium,
                depth: DepthLevel::Mid,
            })
        );
        assert_eq!(markup.float, FloatLevel::None);
    }

    #[test]
    fn parallax_none_is_no_binding() {
        let attrs: &[(&str, &str)] = &[(PARALLAX, "none")];
        let markup = ElementMarkup::from_attributes(attrs);
        assert_eq!(markup.parallax, None);
        assert!(!markup.is_animated());
    }

    #[test]
    fn idle_membership_with_overrides() {
        let mut attrs = HashMap::new();
        let _ = attrs.insert(IDLE_ELEMENT.to_owned(), "name".to_owned());
        let _ = attrs.insert(IDLE_DRIFT.to_owned(), "40".to_owned());
        let _ = attrs.insert(LAYER.to_owned(), "abc".to_owned());

        let markup = ElementMarkup::from_attributes(&attrs);
        let idle = markup.idle.unwrap();
        assert_eq!(idle.name, "name");
        assert_eq!(
            idle.config,
            Some(IdleEffectConfig {
                drift: 40.0,
                rotation: 2.0,
                scale: 0.95,
            })
        );
        // Present but malformed layer depth defaults to 1
        assert_eq!(markup.layer_depth, Some(1.0));
    }

    #[test]
    fn keywords_round_trip() {
        for dir in RevealDirection::ALL {
            assert_eq!(dir.keyword().parse::<RevealDirection>(), Ok(*dir));
        }
        for depth in DepthLevel::ALL {
            assert_eq!(depth.keyword().parse::<DepthLevel>(), Ok(*depth));
        }
    }
}
