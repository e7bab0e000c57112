//! Intervention levers and per-request selections.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// One of the five intervention levers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intervention {
    /// Indoor air filtration and ventilation.
    CleanAir,
    /// Rapid testing. Lowers both infection risk and acute severity.
    Diagnostics,
    /// Prophylactic nasal sprays.
    NoseSprays,
    /// Early antiviral treatment of acute infection.
    AcuteTreatment,
    /// Treatment of established long COVID.
    LcTreatment,
}

impl Intervention {
    /// Every lever, in canonical order.
    pub const ALL: [Self; 5] = [
        Self::CleanAir,
        Self::Diagnostics,
        Self::NoseSprays,
        Self::AcuteTreatment,
        Self::LcTreatment,
    ];

    /// The snake_case key used in requests.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CleanAir => "clean_air",
            Self::Diagnostics => "diagnostics",
            Self::NoseSprays => "nose_sprays",
            Self::AcuteTreatment => "acute_treatment",
            Self::LcTreatment => "lc_treatment",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CleanAir => "Clean Air",
            Self::Diagnostics => "Diagnostics",
            Self::NoseSprays => "Nose Sprays",
            Self::AcuteTreatment => "Acute Treatment",
            Self::LcTreatment => "Long COVID Treatment",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::CleanAir => 1,
            Self::Diagnostics => 1 << 1,
            Self::NoseSprays => 1 << 2,
            Self::AcuteTreatment => 1 << 3,
            Self::LcTreatment => 1 << 4,
        }
    }
}

impl fmt::Display for Intervention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which levers are enabled for a single simulation.
///
/// Every toggle defaults to `false`, so the default value is the status-quo
/// scenario. Any combination is valid. When deserialized, a missing or `null`
/// toggle reads as `false` and any other non-boolean value is an error.
///
/// # Examples
///
/// ```
/// use dalysim::{Intervention, InterventionSelection};
///
/// let selection = InterventionSelection::none()
///     .with(Intervention::CleanAir)
///     .with(Intervention::LcTreatment);
/// assert_eq!(selection.len(), 2);
/// assert!(selection.is_enabled(Intervention::CleanAir));
/// assert!(!selection.diagnostics);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct InterventionSelection {
    /// Clean air toggle.
    #[serde(deserialize_with = "toggle")]
    pub clean_air: bool,
    /// Diagnostics toggle.
    #[serde(deserialize_with = "toggle")]
    pub diagnostics: bool,
    /// Nose sprays toggle.
    #[serde(deserialize_with = "toggle")]
    pub nose_sprays: bool,
    /// Acute treatment toggle.
    #[serde(deserialize_with = "toggle")]
    pub acute_treatment: bool,
    /// Long COVID treatment toggle.
    #[serde(deserialize_with = "toggle")]
    pub lc_treatment: bool,
}

fn toggle<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl InterventionSelection {
    /// Number of distinct selections.
    pub const COMBINATIONS: usize = 1 << Intervention::ALL.len();

    /// The status-quo scenario: nothing enabled.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            clean_air: false,
            diagnostics: false,
            nose_sprays: false,
            acute_treatment: false,
            lc_treatment: false,
        }
    }

    /// Every lever enabled.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            clean_air: true,
            diagnostics: true,
            nose_sprays: true,
            acute_treatment: true,
            lc_treatment: true,
        }
    }

    /// Returns a copy with `lever` enabled.
    #[must_use]
    pub fn with(mut self, lever: Intervention) -> Self {
        *self.toggle_mut(lever) = true;
        self
    }

    /// Returns a copy with `lever` disabled.
    #[must_use]
    pub fn without(mut self, lever: Intervention) -> Self {
        *self.toggle_mut(lever) = false;
        self
    }

    /// Enables or disables a lever in place.
    pub fn set(&mut self, lever: Intervention, enabled: bool) {
        *self.toggle_mut(lever) = enabled;
    }

    /// Whether `lever` is enabled.
    #[must_use]
    pub const fn is_enabled(&self, lever: Intervention) -> bool {
        match lever {
            Intervention::CleanAir => self.clean_air,
            Intervention::Diagnostics => self.diagnostics,
            Intervention::NoseSprays => self.nose_sprays,
            Intervention::AcuteTreatment => self.acute_treatment,
            Intervention::LcTreatment => self.lc_treatment,
        }
    }

    /// Enabled levers in canonical order.
    pub fn enabled(&self) -> impl Iterator<Item = Intervention> + '_ {
        Intervention::ALL
            .into_iter()
            .filter(move |lever| self.is_enabled(*lever))
    }

    /// Display labels of the enabled levers, in canonical order.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.enabled().map(Intervention::label).collect()
    }

    /// Number of enabled levers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enabled().count()
    }

    /// True for the status-quo scenario.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if every lever enabled here is also enabled in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.enabled().all(|lever| other.is_enabled(lever))
    }

    /// All 32 selections, ordered by bitmask (`clean_air` is the lowest bit).
    pub fn subsets() -> impl Iterator<Item = Self> {
        (0..Self::COMBINATIONS).map(|mask| {
            let mut selection = Self::none();
            for lever in Intervention::ALL {
                if mask & usize::from(lever.bit()) != 0 {
                    selection.set(lever, true);
                }
            }
            selection
        })
    }

    fn toggle_mut(&mut self, lever: Intervention) -> &mut bool {
        match lever {
            Intervention::CleanAir => &mut self.clean_air,
            Intervention::Diagnostics => &mut self.diagnostics,
            Intervention::NoseSprays => &mut self.nose_sprays,
            Intervention::AcuteTreatment => &mut self.acute_treatment,
            Intervention::LcTreatment => &mut self.lc_treatment,
        }
    }
}

impl FromIterator<Intervention> for InterventionSelection {
    fn from_iter<I: IntoIterator<Item = Intervention>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), Self::with)
    }
}

impl fmt::Display for InterventionSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("status quo");
        }
        let keys: Vec<&str> = self.enabled().map(Intervention::key).collect();
        f.write_str(&keys.join("+"))
    }
}
