use std::marker::PhantomData;

use futures_util::future::BoxFuture;
use tracing::debug;

use crate::application::PromptOutcome;
use crate::domain::DomainError;

pub type StepFuture<'a> = BoxFuture<'a, Result<PromptOutcome<String>, DomainError>>;

/// Values collected by a wizard, in step order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormAnswers {
    fields: Vec<(&'static str, String)>,
}

impl FormAnswers {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Removes and returns a field, failing if the wizard never asked for it.
    pub fn take(&mut self, field: &str) -> Result<String, DomainError> {
        let index = self
            .fields
            .iter()
            .position(|(name, _)| *name == field)
            .ok_or_else(|| DomainError::internal(format!("Wizard has no field '{}'", field)))?;
        Ok(self.fields.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn insert(&mut self, field: &'static str, value: String) {
        self.fields.push((field, value));
    }
}

/// One field of a wizard and the prompter that fills it.
///
/// The prompter sees the answers gathered by earlier steps.
pub struct WizardStep<'a> {
    field: &'static str,
    prompter: Box<dyn Fn(&FormAnswers) -> StepFuture<'a> + Send + Sync + 'a>,
}

impl<'a> WizardStep<'a> {
    pub fn new<F>(field: &'static str, prompter: F) -> Self
    where
        F: Fn(&FormAnswers) -> StepFuture<'a> + Send + Sync + 'a,
    {
        Self {
            field,
            prompter: Box::new(prompter),
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }
}

/// Runs `steps` in order. The first cancelled step ends the run; later
/// prompters are never invoked.
pub async fn run_steps(steps: &[WizardStep<'_>]) -> Result<PromptOutcome<FormAnswers>, DomainError> {
    let mut answers = FormAnswers::default();

    for step in steps {
        debug!("Wizard step: {}", step.field);
        match (step.prompter)(&answers).await? {
            PromptOutcome::Completed(value) => answers.insert(step.field, value),
            PromptOutcome::Cancelled => {
                debug!("Wizard cancelled at step: {}", step.field);
                return Ok(PromptOutcome::Cancelled);
            }
        }
    }

    Ok(PromptOutcome::Completed(answers))
}

/// A typed record built from completed wizard answers.
pub trait FormResponse: Sized {
    fn from_answers(answers: FormAnswers) -> Result<Self, DomainError>;
}

/// An ordered list of steps producing an `R`.
pub struct Wizard<'a, R> {
    steps: Vec<WizardStep<'a>>,
    _response: PhantomData<fn() -> R>,
}

impl<'a, R: FormResponse> Wizard<'a, R> {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            _response: PhantomData,
        }
    }

    pub fn step<F>(mut self, field: &'static str, prompter: F) -> Self
    where
        F: Fn(&FormAnswers) -> StepFuture<'a> + Send + Sync + 'a,
    {
        self.steps.push(WizardStep::new(field, prompter));
        self
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.steps.iter().map(WizardStep::field).collect()
    }

    pub async fn run(&self) -> Result<PromptOutcome<R>, DomainError> {
        match run_steps(&self.steps).await? {
            PromptOutcome::Completed(answers) => Ok(PromptOutcome::Completed(R::from_answers(answers)?)),
            PromptOutcome::Cancelled => Ok(PromptOutcome::Cancelled),
        }
    }
}

impl<'a, R: FormResponse> Default for Wizard<'a, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use futures_util::FutureExt;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair {
        first: String,
        second: String,
    }

    impl FormResponse for Pair {
        fn from_answers(mut answers: FormAnswers) -> Result<Self, DomainError> {
            Ok(Self {
                first: answers.take("first")?,
                second: answers.take("second")?,
            })
        }
    }

    fn answer(value: &'static str) -> impl Fn(&FormAnswers) -> StepFuture<'static> + Send + Sync {
        move |_| async move { Ok(PromptOutcome::Completed(value.to_string())) }.boxed()
    }

    #[tokio::test]
    async fn test_completes_with_each_answer() {
        let wizard: Wizard<Pair> = Wizard::new()
            .step("first", answer("a"))
            .step("second", answer("b"));

        let result = wizard.run().await.unwrap();

        assert_eq!(
            result,
            PromptOutcome::Completed(Pair {
                first: "a".to_string(),
                second: "b".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_cancel_skips_later_steps() {
        let later_calls = Arc::new(AtomicUsize::new(0));
        let counter = later_calls.clone();

        let wizard: Wizard<Pair> = Wizard::new()
            .step("first", |_| async { Ok(PromptOutcome::Cancelled) }.boxed())
            .step("second", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok(PromptOutcome::Completed("never".to_string())) }.boxed()
            });

        let result = wizard.run().await.unwrap();

        assert!(result.is_cancelled());
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_later_step_sees_earlier_answers() {
        let wizard: Wizard<Pair> = Wizard::new()
            .step("first", answer("lambda"))
            .step("second", |answers| {
                let seen = answers.get("first").unwrap_or_default().to_uppercase();
                async move { Ok(PromptOutcome::Completed(seen)) }.boxed()
            });

        let result = wizard.run().await.unwrap().completed().unwrap();
        assert_eq!(result.second, "LAMBDA");
    }

    #[tokio::test]
    async fn test_prompt_failure_is_an_error() {
        let wizard: Wizard<Pair> = Wizard::new()
            .step("first", |_| async { Err(DomainError::prompt("no terminal")) }.boxed())
            .step("second", answer("b"));

        let err = wizard.run().await.unwrap_err();
        assert!(matches!(err, DomainError::PromptError(_)));
    }

    #[tokio::test]
    async fn test_run_steps_collects_answers_in_order() {
        let steps = vec![
            WizardStep::new("first", answer("a")),
            WizardStep::new("second", answer("b")),
        ];

        let answers = run_steps(&steps).await.unwrap().completed().unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.get("second"), Some("b"));

        let no_steps = run_steps(&[]).await.unwrap().map(|answers| answers.is_empty());
        assert_eq!(no_steps, PromptOutcome::Completed(true));
    }

    #[tokio::test]
    async fn test_missing_field_fails_conversion() {
        let wizard: Wizard<Pair> = Wizard::new().step("first", answer("a"));
        assert_eq!(wizard.fields(), vec!["first"]);
        assert!(wizard.run().await.is_err());
    }
}
