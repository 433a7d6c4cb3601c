//! Published flow-law constants and their conversion for ASPECT.
//!
//! Published values follow the units of Hirth & Kohlstedt (2003):
//! A in MPa^-n-r um^m s^-1, E in kJ/mol, V in 10^-6 m^3/mol.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::{DomainError, DomainResult};

macro_rules! named_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| DomainError::UnknownValue {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

named_enum!(
    /// Rock or mineral being deformed.
    Material, "material" {
        Olivine => "olivine",
        Quartzite => "quartzite",
        Anorthite => "anorthite",
    }
);

named_enum!(
    /// First author of the publication the constants come from.
    Source, "source" {
        Hirth => "hirth",
        Gleason => "gleason",
        Rybacki => "rybacki",
    }
);

named_enum!(
    /// Deformation mechanism.
    Creep, "creep mechanism" {
        Dislocation => "dislocation",
        Diffusion => "diffusion",
    }
);

named_enum!(
    /// Whether the rheology is wet or dry.
    Water, "water content" {
        Dry => "dry",
        Wet => "wet",
    }
);

/// Power-law creep constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLaw {
    /// Prefactor
    pub a: f64,
    /// Stress exponent, 1 for diffusion creep
    pub n: f64,
    /// Grain size exponent, 0 for dislocation creep
    pub m: f64,
    /// Fugacity exponent, 0 for dry rheology
    pub r: f64,
    /// Activation energy
    pub e: f64,
    /// Activation volume
    pub v: f64,
}

impl FlowLaw {
    /// Convert published units to SI. Only A, E and V change.
    ///
    /// `A_SI = A * 1e6^(-n-r) * 1e-6^m`, `E_SI = E * 1000`, `V_SI = V * 1e-6`
    pub fn to_si(&self) -> FlowLaw {
        FlowLaw {
            a: self.a * 1e6_f64.powf(-self.n - self.r) * 1e-6_f64.powf(self.m),
            e: self.e * 1000.0,
            v: self.v * 1e-6,
            ..*self
        }
    }

    /// Constants for the given combination, in published units.
    pub fn published(
        material: Material,
        source: Source,
        creep: Creep,
        water: Water,
    ) -> DomainResult<FlowLaw> {
        catalog()
            .into_iter()
            .find(|entry| entry.matches(material, source, creep, water))
            .map(|entry| entry.law)
            .ok_or_else(|| DomainError::UnknownFlowLaw {
                material: material.to_string(),
                source_name: source.to_string(),
                creep: creep.to_string(),
                water: water.to_string(),
            })
    }
}

/// Scale a prefactor from uniaxial experiments to the strain-rate/viscosity
/// convention used by ASPECT: `3^((n+1)/2) / 2 * A_SI`.
pub fn scale_prefactor(a_si: f64, n: f64) -> f64 {
    3_f64.powf((n + 1.0) / 2.0) / 2.0 * a_si
}

/// One row of the published table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PublishedLaw {
    pub material: Material,
    pub source: Source,
    pub creep: Creep,
    pub water: Water,
    pub law: FlowLaw,
}

impl PublishedLaw {
    fn matches(&self, material: Material, source: Source, creep: Creep, water: Water) -> bool {
        self.material == material
            && self.source == source
            && self.creep == creep
            && self.water == water
    }
}

/// Every published flow law known to gdmate.
pub fn catalog() -> Vec<PublishedLaw> {
    use Creep::*;
    use Material::*;
    use Source::*;
    use Water::*;

    let row = |material, source, creep, water, a, n, m, r, e, v| PublishedLaw {
        material,
        source,
        creep,
        water,
        law: FlowLaw { a, n, m, r, e, v },
    };

    vec![
        // V from Table 2, variable in the source
        row(Olivine, Hirth, Dislocation, Dry, 1.1e5, 3.5, 0.0, 0.0, 530.0, 18.0),
        // constant C_OH of 1000 H/10^6 Si
        row(Olivine, Hirth, Dislocation, Wet, 90.0, 3.5, 0.0, 1.2, 480.0, 11.0),
        // V at the lower end of the 2-10 range
        row(Olivine, Hirth, Diffusion, Dry, 1.5e9, 1.0, 3.0, 0.0, 375.0, 2.0),
        row(Olivine, Hirth, Diffusion, Wet, 1.0e6, 1.0, 3.0, 1.0, 335.0, 4.0),
        // water fugacity not part of the published units
        row(Quartzite, Gleason, Dislocation, Wet, 1.1e-4, 4.0, 0.0, 0.0, 223.0, 0.0),
        // reported as log(A) = 0.2
        row(Anorthite, Rybacki, Dislocation, Wet, 10_f64.powf(0.2), 3.0, 0.0, 1.0, 345.0, 38.0),
    ]
}

/// A flow law taken through every conversion stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectFlowLaw {
    pub published: FlowLaw,
    pub si: FlowLaw,
    pub a_scaled: f64,
}

impl AspectFlowLaw {
    pub fn from_published(published: FlowLaw) -> Self {
        let si = published.to_si();
        let a_scaled = scale_prefactor(si.a, si.n);
        Self {
            published,
            si,
            a_scaled,
        }
    }

    pub fn lookup(
        material: Material,
        source: Source,
        creep: Creep,
        water: Water,
    ) -> DomainResult<Self> {
        FlowLaw::published(material, source, creep, water).map(Self::from_published)
    }

    /// Final constants for ASPECT: scaled A with SI E and V.
    pub fn parameters(&self) -> FlowLaw {
        FlowLaw {
            a: self.a_scaled,
            ..self.si
        }
    }
}

impl fmt::Display for AspectFlowLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.published;
        writeln!(f, "Published Values:")?;
        writeln!(f, "A - prefactor (MPa^-n-r um^m_diff s^-1): {:.2e}", p.a)?;
        writeln!(f, "n - stress exponent: {:.2e}", p.n)?;
        writeln!(f, "m_diff - grain size exponent: {:.2e}", p.m)?;
        writeln!(f, "r - fugacity exponent: {:.2e}", p.r)?;
        writeln!(f, "E - activation energy (kJ/mol): {:.2e}", p.e)?;
        writeln!(f, "V - activation volume (10^-6 m^3/mol): {:.2e}", p.v)?;
        writeln!(f)?;
        writeln!(f, "Converted to SI Units:")?;
        writeln!(f, "A (Pa^-n-r m^m_diff s^-1): {:.2e}", self.si.a)?;
        writeln!(f, "E - activation energy (J/mol): {:.2e}", self.si.e)?;
        writeln!(f, "V - activation volume (m^3/mol): {:.2e}", self.si.v)?;
        writeln!(f)?;
        writeln!(f, "Scaled A for ASPECT:")?;
        write!(f, "A scaled (Pa^-n-r m^m_diff s^-1): {:.2e}", self.a_scaled)
    }
}
