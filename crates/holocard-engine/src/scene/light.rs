use glam::Vec3;

/// Sky/ground light: surfaces facing `direction` get `diffuse`, surfaces facing
/// away get `ground`, blended by the normal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HemisphericLight {
    /// Points towards the sky. Need not be normalized.
    pub direction: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub ground: Vec3,
    pub intensity: f32,
}

impl Default for HemisphericLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(2.0, 1.0, 0.0),
            diffuse: Vec3::new(1.0, 0.57, 0.5),
            specular: Vec3::ONE,
            ground: Vec3::new(0.29, 0.0, 0.55),
            intensity: 2.0,
        }
    }
}

impl HemisphericLight {
    /// Diffuse contribution for a surface normal, mirroring the model shader.
    pub fn irradiance(&self, normal: Vec3) -> Vec3 {
        let n = normal.normalize_or_zero();
        let l = self.direction.normalize_or_zero();
        let t = n.dot(l) * 0.5 + 0.5;
        self.ground.lerp(self.diffuse, t) * self.intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_light_gets_full_diffuse() {
        let light = HemisphericLight::default();
        let e = light.irradiance(light.direction);
        assert!((e - light.diffuse * light.intensity).abs().max_element() < 1e-5);
    }

    #[test]
    fn facing_away_gets_ground_color() {
        let light = HemisphericLight::default();
        let e = light.irradiance(-light.direction);
        assert!((e - light.ground * light.intensity).abs().max_element() < 1e-5);
    }
}
