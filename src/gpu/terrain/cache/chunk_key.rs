// ============================================
// Chunk Key - Идентификатор чанка
// ============================================

use ultraviolet::Vec3;

/// Ключ чанка: целочисленная координата (x, z) на бесконечной сетке
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct ChunkKey {
    pub x: i32,
    pub z: i32,
}

impl ChunkKey {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Чанк, в котором находится мировая позиция (floor(p / chunk_size)).
    /// За пределами i32 координата насыщается, NaN даёт 0.
    pub fn from_world(position: Vec3, chunk_size: f32) -> Self {
        Self {
            x: (position.x / chunk_size).floor() as i32,
            z: (position.z / chunk_size).floor() as i32,
        }
    }

    /// Мировой origin чанка: (x * size, 0, z * size)
    pub fn origin(self, chunk_size: f32) -> Vec3 {
        Vec3::new(self.x as f32 * chunk_size, 0.0, self.z as f32 * chunk_size)
    }

    /// Сдвиг с насыщением на краю сетки
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            z: self.z.saturating_add(dz),
        }
    }
}

/// Сколько чанков окно захватывает в каждую сторону от центра
#[inline]
fn window_reach(render_distance: u32) -> i64 {
    (render_distance.max(1) as i64 - 1).min(i32::MAX as i64)
}

/// Сторона квадратного окна видимых чанков: 2 * render_distance - 1
#[inline]
pub fn window_side(render_distance: u32) -> i64 {
    window_reach(render_distance) * 2 + 1
}

/// Центр окна, сдвинутый внутрь сетки так, чтобы всё окно
/// помещалось в диапазон i32
pub fn clamp_center(center: ChunkKey, render_distance: u32) -> ChunkKey {
    let reach = window_reach(render_distance);
    let (lo, hi) = (i32::MIN as i64 + reach, i32::MAX as i64 - reach);
    ChunkKey::new(
        (center.x as i64).clamp(lo, hi) as i32,
        (center.z as i64).clamp(lo, hi) as i32,
    )
}

/// Окно чанков вокруг центра, построчно (z снаружи, x внутри).
/// Центр у края сетки прижимается через `clamp_center`.
pub fn required_window(center: ChunkKey, render_distance: u32) -> impl Iterator<Item = ChunkKey> {
    let reach = window_reach(render_distance);
    let side = window_side(render_distance);
    let center = clamp_center(center, render_distance);
    let (start_x, start_z) = (center.x as i64 - reach, center.z as i64 - reach);
    (0..side).flat_map(move |dz| {
        (0..side).map(move |dx| ChunkKey::new((start_x + dx) as i32, (start_z + dz) as i32))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_from_world_floors_negative_positions() {
        assert_eq!(ChunkKey::from_world(Vec3::new(8.0, 0.0, 8.0), 16.0), ChunkKey::new(0, 0));
        assert_eq!(ChunkKey::from_world(Vec3::new(-0.5, 3.0, 16.0), 16.0), ChunkKey::new(-1, 1));
        assert_eq!(ChunkKey::from_world(Vec3::new(-16.0, 0.0, -16.1), 16.0), ChunkKey::new(-1, -2));
    }

    #[test]
    fn test_origin_lies_on_xz_plane() {
        let origin = ChunkKey::new(-2, 3).origin(16.0);
        assert_eq!((origin.x, origin.y, origin.z), (-32.0, 0.0, 48.0));
    }

    #[test]
    fn test_window_has_expected_size() {
        for distance in 1..=6 {
            let keys: HashSet<_> = required_window(ChunkKey::new(3, -7), distance).collect();
            let side = (2 * distance - 1) as usize;
            assert_eq!(keys.len(), side * side);
        }
    }

    #[test]
    fn test_window_is_centered() {
        let keys: Vec<_> = required_window(ChunkKey::new(0, 0), 2).collect();
        assert_eq!(keys.first(), Some(&ChunkKey::new(-1, -1)));
        assert_eq!(keys.last(), Some(&ChunkKey::new(1, 1)));
        assert!(keys.contains(&ChunkKey::new(0, 0)));

        let single: Vec<_> = required_window(ChunkKey::new(5, 5), 1).collect();
        assert_eq!(single, vec![ChunkKey::new(5, 5)]);
    }

    #[test]
    fn test_far_positions_saturate() {
        let key = ChunkKey::from_world(Vec3::new(1.0e12, 0.0, -1.0e12), 16.0);
        assert_eq!(key, ChunkKey::new(i32::MAX, i32::MIN));
        assert_eq!(key.offset(1, -1), key);
    }

    #[test]
    fn test_window_at_grid_edge_stays_in_range() {
        let edge = ChunkKey::new(i32::MAX, i32::MIN);
        assert_eq!(clamp_center(edge, 3), ChunkKey::new(i32::MAX - 2, i32::MIN + 2));
        assert_eq!(clamp_center(ChunkKey::new(7, -7), 3), ChunkKey::new(7, -7));

        let keys: HashSet<_> = required_window(edge, 3).collect();
        assert_eq!(keys.len(), 25);
        assert!(keys.contains(&ChunkKey::new(i32::MAX, i32::MIN)));
        assert!(keys.contains(&ChunkKey::new(i32::MAX - 4, i32::MIN + 4)));
    }

    #[test]
    fn test_huge_render_distance_does_not_overflow() {
        assert_eq!(window_side(u32::MAX), u32::MAX as i64);
        let center = clamp_center(ChunkKey::new(1000, -1000), u32::MAX);
        assert_eq!(center, ChunkKey::new(0, -1));
        let first = required_window(ChunkKey::new(1000, -1000), u32::MAX).next();
        assert_eq!(first, Some(ChunkKey::new(i32::MIN + 1, i32::MIN)));
    }
}
