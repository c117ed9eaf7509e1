//! Named continuous colormaps and the multi-stop interpolation engine used
//! to turn normalized radiance values into RGBA pixels.

/// A color stop: position in [0, 1] mapped to an RGB color.
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub t: f64,
    pub rgb: [u8; 3],
}

impl ColorStop {
    const fn new(t: f64, r: u8, g: u8, b: u8) -> Self {
        Self { t, rgb: [r, g, b] }
    }
}

/// Continuous colormaps selectable by name from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    Plasma,
    Viridis,
    Inferno,
    Magma,
    Grayscale,
}

const PLASMA_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 13, 8, 135),
    ColorStop::new(0.14, 84, 2, 163),
    ColorStop::new(0.29, 139, 10, 165),
    ColorStop::new(0.43, 185, 50, 137),
    ColorStop::new(0.57, 219, 92, 104),
    ColorStop::new(0.71, 244, 136, 73),
    ColorStop::new(0.86, 254, 188, 43),
    ColorStop::new(1.00, 240, 249, 33),
];

const VIRIDIS_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 68, 1, 84),
    ColorStop::new(0.14, 70, 50, 127),
    ColorStop::new(0.29, 54, 92, 141),
    ColorStop::new(0.43, 39, 127, 142),
    ColorStop::new(0.57, 31, 161, 135),
    ColorStop::new(0.71, 74, 193, 109),
    ColorStop::new(0.86, 159, 218, 58),
    ColorStop::new(1.00, 253, 231, 37),
];

const INFERNO_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 0, 0, 4),
    ColorStop::new(0.25, 87, 16, 110),
    ColorStop::new(0.50, 188, 55, 84),
    ColorStop::new(0.75, 249, 142, 9),
    ColorStop::new(1.00, 252, 255, 164),
];

const MAGMA_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 0, 0, 4),
    ColorStop::new(0.25, 81, 18, 124),
    ColorStop::new(0.50, 183, 55, 121),
    ColorStop::new(0.75, 252, 137, 97),
    ColorStop::new(1.00, 252, 253, 191),
];

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_color(c1: [u8; 3], c2: [u8; 3], t: f64) -> [u8; 3] {
    [
        lerp(c1[0] as f64, c2[0] as f64, t).round() as u8,
        lerp(c1[1] as f64, c2[1] as f64, t).round() as u8,
        lerp(c1[2] as f64, c2[2] as f64, t).round() as u8,
    ]
}

fn multi_stop(stops: &[ColorStop], t: f64) -> [u8; 3] {
    if t <= 0.0 {
        return stops[0].rgb;
    }
    if t >= 1.0 {
        return stops[stops.len() - 1].rgb;
    }
    for i in 1..stops.len() {
        if t <= stops[i].t {
            let ratio = (t - stops[i - 1].t) / (stops[i].t - stops[i - 1].t);
            return lerp_color(stops[i - 1].rgb, stops[i].rgb, ratio);
        }
    }
    stops[stops.len() - 1].rgb
}

impl Colormap {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "plasma" => Some(Colormap::Plasma),
            "viridis" => Some(Colormap::Viridis),
            "inferno" => Some(Colormap::Inferno),
            "magma" => Some(Colormap::Magma),
            "grayscale" | "gray" => Some(Colormap::Grayscale),
            _ => None,
        }
    }

    /// Evaluate the colormap at normalized position `t` ∈ [0, 1].
    /// Values outside the range are clamped to the endpoint colors.
    /// Alpha is always fully opaque.
    pub fn sample(&self, t: f64) -> [u8; 4] {
        let [r, g, b] = match self {
            Colormap::Plasma => multi_stop(PLASMA_STOPS, t),
            Colormap::Viridis => multi_stop(VIRIDIS_STOPS, t),
            Colormap::Inferno => multi_stop(INFERNO_STOPS, t),
            Colormap::Magma => multi_stop(MAGMA_STOPS, t),
            Colormap::Grayscale => {
                let v = (t.clamp(0.0, 1.0) * 255.0).round() as u8;
                [v, v, v]
            }
        };

        [r, g, b, 255]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plasma_endpoints() {
        assert_eq!(Colormap::Plasma.sample(0.0), [13, 8, 135, 255]);
        assert_eq!(Colormap::Plasma.sample(1.0), [240, 249, 33, 255]);
    }

    #[test]
    fn test_out_of_range_clamps_to_endpoints() {
        assert_eq!(
            Colormap::Viridis.sample(-3.0),
            Colormap::Viridis.sample(0.0)
        );
        assert_eq!(Colormap::Viridis.sample(7.5), Colormap::Viridis.sample(1.0));
    }

    #[test]
    fn test_grayscale_midpoint() {
        assert_eq!(Colormap::Grayscale.sample(0.5), [128, 128, 128, 255]);
    }

    #[test]
    fn test_interpolation_is_monotone_between_stops() {
        // Grayscale must increase with t.
        let lo = Colormap::Grayscale.sample(0.2)[0];
        let hi = Colormap::Grayscale.sample(0.8)[0];
        assert!(lo < hi);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Colormap::from_name("plasma"), Some(Colormap::Plasma));
        assert_eq!(Colormap::from_name("gray"), Some(Colormap::Grayscale));
        assert_eq!(Colormap::from_name("turbo"), None);
    }
}
