//! Tests for MovementResolver.

#[cfg(test)]
mod tests {
    use super::super::avoidance::PeerView;
    use super::super::body::Body;
    use super::super::resolver::*;
    use crate::components::{BotId, Facing};
    use approx::assert_relative_eq;
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn body_at(x: f32, y: f32) -> Body {
        Body::new(BotId(1), Vec2::new(x, y), Vec2::splat(100.0))
    }

    fn peer_at(x: f32, y: f32) -> PeerView {
        PeerView {
            id: BotId(2),
            position: Vec2::new(x, y),
            size: Vec2::splat(100.0),
            alive: true,
            spawned: true,
        }
    }

    #[test]
    fn test_move_toward_without_peers() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut body = body_at(0.0, 0.0);

        let outcome = move_toward(&mut body, Vec2::new(1000.0, 0.0), 0.5, Stride::wander(100.0), None, &mut rng);

        assert_eq!(outcome, MoveOutcome::Moved);
        assert_relative_eq!(body.position.x, 50.0);
        assert_relative_eq!(body.position.y, 0.0);
        assert_eq!(body.facing, Facing::Right);
    }

    #[test]
    fn test_move_toward_zero_direction_is_stationary() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut body = body_at(30.0, 40.0);
        body.facing = Facing::Left;

        let outcome = move_toward(&mut body, Vec2::new(30.0, 40.0), 1.0, Stride::chase(100.0), None, &mut rng);

        assert_eq!(outcome, MoveOutcome::Stationary);
        assert_eq!(body.position, Vec2::new(30.0, 40.0));
        assert_eq!(body.facing, Facing::Left);
    }

    #[test]
    fn test_move_toward_avoids_blocking_peer_at_reduced_speed() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut body = body_at(0.0, 0.0);
        // Сосед прямо по курсу: следующая позиция (10, 0) в его hitbox
        let peers = [peer_at(60.0, 0.0)];

        let outcome = move_toward(
            &mut body,
            Vec2::new(500.0, 0.0),
            0.1,
            Stride::chase(100.0),
            Some(&peers),
            &mut rng,
        );

        assert_eq!(outcome, MoveOutcome::Avoided);
        // Отталкивание от соседа: (10,0) - (60,0) → влево, половина скорости
        assert_relative_eq!(body.position.x, -5.0, epsilon = 1e-4);
        assert_relative_eq!(body.position.y, 0.0, epsilon = 1e-4);
        assert_eq!(body.facing, Facing::Left);
    }

    #[test]
    fn test_wander_avoids_at_reduced_fraction_of_speed() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut body = body_at(0.0, 0.0);
        let peers = [peer_at(60.0, 0.0)];

        let outcome = move_toward(
            &mut body,
            Vec2::new(500.0, 0.0),
            0.1,
            Stride::wander(100.0),
            Some(&peers),
            &mut rng,
        );

        assert_eq!(outcome, MoveOutcome::Avoided);
        // 100 * 0.3 * 0.1 влево от соседа
        assert_relative_eq!(body.position.x, -3.0, epsilon = 1e-4);
        assert_relative_eq!(body.position.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_move_toward_ignores_non_blocking_peers() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut body = body_at(0.0, 0.0);
        let peers = [peer_at(0.0, 400.0)];

        let outcome = move_toward(
            &mut body,
            Vec2::new(500.0, 0.0),
            0.1,
            Stride::chase(100.0),
            Some(&peers),
            &mut rng,
        );

        assert_eq!(outcome, MoveOutcome::Moved);
        assert_relative_eq!(body.position.x, 10.0);
    }

    #[test]
    fn test_chase_keeps_stand_off_distance() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut body = body_at(0.0, 0.0);
        body.facing = Facing::Left;

        // Следующая позиция (10, 0) на расстоянии 65 < 70 от цели
        let outcome = move_toward(&mut body, Vec2::new(75.0, 0.0), 0.1, Stride::chase(100.0), None, &mut rng);

        assert_eq!(outcome, MoveOutcome::HeldStandOff);
        assert_eq!(body.position, Vec2::ZERO);
        // Но разворачиваемся к цели
        assert_eq!(body.facing, Facing::Right);
    }

    #[test]
    fn test_vertical_motion_keeps_facing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut body = body_at(0.0, 0.0);
        body.facing = Facing::Left;

        move_toward(&mut body, Vec2::new(5.0, 500.0), 0.1, Stride::wander(100.0), None, &mut rng);

        // x-компонента ~0.01 внутри dead-zone
        assert_eq!(body.facing, Facing::Left);
    }

    #[test]
    fn test_move_away_is_faster_and_opposite() {
        let mut body = body_at(100.0, 0.0);

        let outcome = move_away(&mut body, Vec2::new(200.0, 0.0), 1.0, 60.0);

        assert_eq!(outcome, MoveOutcome::Moved);
        assert_relative_eq!(body.position.x, 100.0 - 60.0 * FLEE_SPEED_MULTIPLIER);
        assert_eq!(body.facing, Facing::Left);
    }

    #[test]
    fn test_move_away_from_coincident_threat_is_stationary() {
        let mut body = body_at(100.0, 100.0);
        let outcome = move_away(&mut body, Vec2::new(100.0, 100.0), 1.0, 60.0);

        assert_eq!(outcome, MoveOutcome::Stationary);
        assert_eq!(body.position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_step_toward_ignores_peers_entirely() {
        let mut body = body_at(0.0, 0.0);

        let outcome = step_toward(&mut body, Vec2::new(0.0, -300.0), 0.5, Stride::patrol(100.0));

        assert_eq!(outcome, MoveOutcome::Moved);
        assert_relative_eq!(body.position.y, -50.0);
        // Чисто вертикальный шаг: facing не трогаем
        assert_eq!(body.facing, Facing::Right);
    }
}
