//! MinuteGenerator against stub models

use govdash_minutes::{
    AgendaItem, GenerativeModel, MeetingInfo, MinuteGenerator, MinutesError, MinutesRequest,
    MinutesResult,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct StubModel {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl StubModel {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl GenerativeModel for StubModel {
    async fn generate(&self, prompt: &str) -> MinutesResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

struct FailingModel;

#[async_trait::async_trait]
impl GenerativeModel for FailingModel {
    async fn generate(&self, _prompt: &str) -> MinutesResult<String> {
        Err(MinutesError::model("status 503 Service Unavailable"))
    }
}

fn request() -> MinutesRequest {
    MinutesRequest::new(
        "Diretora financeira apresentou o orçamento revisado.",
        MeetingInfo::new("Comitê de Investimentos - 3ª reunião", "2024-03-12"),
    )
    .with_agenda(vec![AgendaItem::new("Orçamento LT Serra Azul")])
}

#[tokio::test]
async fn test_generates_validated_minutes() {
    let model = StubModel::replying(
        "```json\n{\"executiveSummary\":\"Orçamento revisado aprovado.\",\
         \"structuredMinutes\":\"1. Orçamento LT Serra Azul: aprovado.\",\
         \"actionPlan\":[{\"task\":\"Atualizar EAC\",\"owner\":\"Controladoria\",\"deadline\":\"2024-03-30\"}]}\n```",
    );
    let generator = MinuteGenerator::new(model.clone());

    let doc = generator.generate(&request()).await.unwrap();
    assert_eq!(doc.executive_summary, "Orçamento revisado aprovado.");
    assert_eq!(doc.action_plan.len(), 1);
    assert_eq!(doc.action_plan[0].owner, "Controladoria");

    let prompts = model.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("1. Orçamento LT Serra Azul"));
    assert!(prompts[0].contains("Diretora financeira apresentou"));
}

#[tokio::test]
async fn test_invalid_shape_is_validation_error() {
    let generator = MinuteGenerator::new(StubModel::replying(r#"{"summary":"sem formato"}"#));
    let err = generator.generate(&request()).await.unwrap_err();
    assert!(matches!(err, MinutesError::Validation(_)));
}

#[tokio::test]
async fn test_model_errors_are_surfaced() {
    let generator = MinuteGenerator::new(Arc::new(FailingModel));
    let err = generator.generate(&request()).await.unwrap_err();
    assert!(matches!(err, MinutesError::Model(_)));
}
