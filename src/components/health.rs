use bevy_ecs::prelude::Component;

/// Hit points for entities that can take damage.
#[derive(Component, Clone, Copy, Debug)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Subtract damage, clamping at zero.
    pub fn damage(&mut self, amount: i32) {
        self.current = (self.current - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut hp = Health::new(3);
        hp.damage(5);
        assert_eq!(hp.current, 0);
        assert!(hp.is_dead());
    }

    #[test]
    fn test_not_dead_while_positive() {
        let mut hp = Health::new(3);
        hp.damage(2);
        assert_eq!(hp.current, 1);
        assert!(!hp.is_dead());
    }
}
