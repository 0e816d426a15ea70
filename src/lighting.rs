/// A light infinitely far away. `direction` points from the scene towards the
/// light and is given in eye space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: [f32; 3],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: [1.0, 1.0, 1.0],
            ambient: [0.0, 0.0, 0.0, 1.0],
            diffuse: [1.0, 1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: [0.1, 0.1, 0.8, 1.0],
            diffuse: [0.8, 0.8, 0.8, 1.0],
            specular: [0.8, 0.8, 1.0, 1.0],
            shininess: 50.0,
        }
    }
}

/// Lighting applied to the gem. Set once when the renderer is built and never
/// changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingConfig {
    pub light: DirectionalLight,
    /// Scene-wide ambient term, added on top of the light's own ambient.
    pub model_ambient: [f32; 4],
    pub material: Material,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light: DirectionalLight::default(),
            model_ambient: [0.5, 0.5, 0.5, 1.0],
            material: Material::default(),
        }
    }
}

/// GPU layout of [`LightingConfig`], matching `Lighting` in `gem.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniforms {
    pub light_direction: [f32; 4],
    pub light_ambient: [f32; 4],
    pub light_diffuse: [f32; 4],
    pub light_specular: [f32; 4],
    pub model_ambient: [f32; 4],
    pub material_ambient: [f32; 4],
    pub material_diffuse: [f32; 4],
    pub material_specular: [f32; 4],
    /// x: shininess, yzw: padding.
    pub material_shininess: [f32; 4],
}

impl From<&LightingConfig> for LightingUniforms {
    fn from(config: &LightingConfig) -> Self {
        let [x, y, z] = normalize(config.light.direction);
        Self {
            light_direction: [x, y, z, 0.0],
            light_ambient: config.light.ambient,
            light_diffuse: config.light.diffuse,
            light_specular: config.light.specular,
            model_ambient: config.model_ambient,
            material_ambient: config.material.ambient,
            material_diffuse: config.material.diffuse,
            material_specular: config.material.specular,
            material_shininess: [config.material.shininess, 0.0, 0.0, 0.0],
        }
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length == 0.0 {
        return [0.0, 0.0, 1.0];
    }
    [v[0] / length, v[1] / length, v[2] / length]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_carry_a_unit_light_direction() {
        let uniforms = LightingUniforms::from(&LightingConfig::default());
        let [x, y, z, w] = uniforms.light_direction;
        assert!((x * x + y * y + z * z - 1.0).abs() < 1e-6);
        assert!((x - y).abs() < 1e-6 && (y - z).abs() < 1e-6);
        assert_eq!(w, 0.0);
    }

    #[test]
    fn uniforms_keep_material_values() {
        let uniforms = LightingUniforms::from(&LightingConfig::default());
        assert_eq!(uniforms.material_ambient, [0.1, 0.1, 0.8, 1.0]);
        assert_eq!(uniforms.material_specular, [0.8, 0.8, 1.0, 1.0]);
        assert_eq!(uniforms.material_shininess[0], 50.0);
        assert_eq!(uniforms.model_ambient, [0.5, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn uniform_size_is_a_multiple_of_sixteen() {
        assert_eq!(std::mem::size_of::<LightingUniforms>() % 16, 0);
    }

    #[test]
    fn zero_direction_falls_back_to_the_view_axis() {
        let mut config = LightingConfig::default();
        config.light.direction = [0.0, 0.0, 0.0];
        let uniforms = LightingUniforms::from(&config);
        assert_eq!(uniforms.light_direction, [0.0, 0.0, 1.0, 0.0]);
    }
}
