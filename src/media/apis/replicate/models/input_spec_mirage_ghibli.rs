use serde::Serialize;

pub const OUTPUT_FORMAT: &str = "webp";

/// Fixed sampling parameters for the Ghibli style model. Only `image` comes
/// from the caller.
#[derive(Debug, Clone, Serialize)]
pub struct InputSpecMirageGhibli {
    pub image: String,
    pub model: String,
    pub prompt: String,
    pub go_fast: bool,
    pub lora_scale: u32,
    pub megapixels: String,
    pub num_outputs: u8,
    pub aspect_ratio: String,
    pub output_format: String,
    pub guidance_scale: u32,
    pub output_quality: u8,
    pub prompt_strength: f32,
    pub extra_lora_scale: u32,
    pub num_inference_steps: u32,
}

impl InputSpecMirageGhibli {
    pub fn with_image(image_url: &str) -> Self {
        Self {
            image: image_url.to_string(),
            model: "dev".to_string(),
            prompt: "Ghibli style photo with detailed rendering".to_string(),
            go_fast: true,
            lora_scale: 1,
            megapixels: "1".to_string(),
            num_outputs: 1,
            aspect_ratio: "1:1".to_string(),
            output_format: OUTPUT_FORMAT.to_string(),
            guidance_scale: 10,
            output_quality: 80,
            prompt_strength: 0.75,
            extra_lora_scale: 1,
            num_inference_steps: 28,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_image_into_fixed_parameters() {
        let value = serde_json::to_value(InputSpecMirageGhibli::with_image(
            "https://example.com/cat.jpg",
        ))
        .unwrap();

        assert_eq!(value["image"], "https://example.com/cat.jpg");
        assert_eq!(value["model"], "dev");
        assert_eq!(value["output_format"], "webp");
        assert_eq!(value["guidance_scale"], 10);
        assert_eq!(value["num_inference_steps"], 28);
        assert_eq!(value["prompt_strength"], 0.75);
        assert_eq!(value["aspect_ratio"], "1:1");
    }
}
