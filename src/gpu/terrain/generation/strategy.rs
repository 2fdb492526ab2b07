// ============================================
// Chunk Strategy - Функция высоты для чанков
// ============================================
// Чистая функция (grid_x, grid_z) -> высота.
// Не имеет состояния, поэтому одна стратегия безопасно
// разделяется между всеми потоками генерации.

use serde::{Deserialize, Serialize};

use super::noise::fbm2d;

/// Стратегия генерации высоты вершин чанка
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChunkStrategy {
    /// Всегда 0
    Flat,
    /// sin(x)
    Sinusoidal,
    /// sin(x) * cos(z)
    SinCos,
    /// (int)x % 2: ступеньки
    Parity,
    /// FBM value noise, нормированный в 0..amplitude
    Noise {
        #[serde(default = "default_frequency")]
        frequency: f32,
        #[serde(default = "default_amplitude")]
        amplitude: f32,
        #[serde(default = "default_octaves")]
        octaves: u32,
        #[serde(default)]
        seed: u32,
    },
    /// Пользовательская функция высоты
    #[serde(skip)]
    Custom(fn(f32, f32) -> f32),
}

fn default_frequency() -> f32 { 0.03 }
fn default_amplitude() -> f32 { 25.0 }
fn default_octaves() -> u32 { 6 }

impl ChunkStrategy {
    /// Шум с параметрами по умолчанию
    pub fn noise(seed: u32) -> Self {
        ChunkStrategy::Noise {
            frequency: default_frequency(),
            amplitude: default_amplitude(),
            octaves: default_octaves(),
            seed,
        }
    }

    /// Высота в точке сетки
    #[inline]
    pub fn height_at(&self, grid_x: f32, grid_z: f32) -> f32 {
        match *self {
            ChunkStrategy::Flat => 0.0,
            ChunkStrategy::Sinusoidal => grid_x.sin(),
            ChunkStrategy::SinCos => grid_x.sin() * grid_z.cos(),
            ChunkStrategy::Parity => (grid_x as i32 % 2) as f32,
            ChunkStrategy::Noise { frequency, amplitude, octaves, seed } => {
                fbm2d(grid_x * frequency, grid_z * frequency, octaves, seed) * amplitude
            }
            ChunkStrategy::Custom(f) => f(grid_x, grid_z),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChunkStrategy::Flat => "flat",
            ChunkStrategy::Sinusoidal => "sinusoidal",
            ChunkStrategy::SinCos => "sin_cos",
            ChunkStrategy::Parity => "parity",
            ChunkStrategy::Noise { .. } => "noise",
            ChunkStrategy::Custom(_) => "custom",
        }
    }
}

impl Default for ChunkStrategy {
    fn default() -> Self { ChunkStrategy::Flat }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_is_zero_everywhere() {
        for (x, z) in [(0.0, 0.0), (3.0, -9.0), (-120.5, 77.0)] {
            assert_eq!(ChunkStrategy::Flat.height_at(x, z), 0.0);
        }
    }

    #[test]
    fn test_trig_strategies() {
        let x = 1.25_f32;
        let z = 0.5_f32;
        assert_eq!(ChunkStrategy::Sinusoidal.height_at(x, z), x.sin());
        assert_eq!(ChunkStrategy::SinCos.height_at(x, z), x.sin() * z.cos());
        assert_eq!(ChunkStrategy::SinCos.height_at(x, 0.0), x.sin());
    }

    #[test]
    fn test_parity_truncates_before_modulo() {
        assert_eq!(ChunkStrategy::Parity.height_at(0.0, 5.0), 0.0);
        assert_eq!(ChunkStrategy::Parity.height_at(1.0, 5.0), 1.0);
        assert_eq!(ChunkStrategy::Parity.height_at(3.9, 0.0), 1.0);
        assert_eq!(ChunkStrategy::Parity.height_at(4.2, 0.0), 0.0);
        assert_eq!(ChunkStrategy::Parity.height_at(-3.0, 0.0), -1.0);
    }

    #[test]
    fn test_noise_respects_amplitude() {
        let strategy = ChunkStrategy::Noise { frequency: 0.1, amplitude: 10.0, octaves: 4, seed: 9 };
        for i in 0..64 {
            let h = strategy.height_at(i as f32, (i * 3) as f32);
            assert!((0.0..=10.0).contains(&h));
        }
    }

    #[test]
    fn test_custom_function() {
        fn ramp(x: f32, z: f32) -> f32 { x + 2.0 * z }
        assert_eq!(ChunkStrategy::Custom(ramp).height_at(1.0, 2.0), 5.0);
        assert_eq!(ChunkStrategy::Custom(ramp).name(), "custom");
    }

    #[test]
    fn test_parse_tagged_json() {
        let s: ChunkStrategy = serde_json::from_str(r#"{ "kind": "sin_cos" }"#).unwrap();
        assert!(matches!(s, ChunkStrategy::SinCos));

        let s: ChunkStrategy = serde_json::from_str(r#"{ "kind": "noise", "seed": 123 }"#).unwrap();
        match s {
            ChunkStrategy::Noise { frequency, amplitude, octaves, seed } => {
                assert_eq!((frequency, amplitude, octaves, seed), (0.03, 25.0, 6, 123));
            }
            other => panic!("unexpected strategy {:?}", other),
        }
    }
}
