use anyhow::Result;

use crate::ModelIdentifier;

pub struct ModelsController;

impl ModelsController {
    pub fn new() -> Self {
        Self
    }

    pub async fn list(&self) -> Result<String> {
        let default = ModelIdentifier::default();
        let mut output = "Available models:\n\n".to_string();
        for model in ModelIdentifier::ALL {
            let marker = if model == default { " (default)" } else { "" };
            output.push_str(&format!("  {}{}\n", model.display_name(), marker));
            output.push_str(&format!("    Id: {}\n", model.as_str()));
        }
        Ok(output)
    }
}

impl Default for ModelsController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_every_model() {
        let output = ModelsController::new().list().await.unwrap();
        for model in ModelIdentifier::ALL {
            assert!(output.contains(model.as_str()));
        }
        assert_eq!(output.matches("(default)").count(), 1);
    }
}
