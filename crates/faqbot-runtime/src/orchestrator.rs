//! FAQ creation pipeline.
//!
//! `received → normalized → validated → classified → persisted`, leaving
//! early with a `Rejection` (bad input) or a store error.

use tracing::{debug, error, info};

use faqbot_ingest::{extract_fields, extract_keywords, is_faq_command, normalize_keywords};
use faqbot_store::{FaqStore, NewFaq};

use crate::classify::resolve_category;
use crate::types::*;

/// Request fields after raw-text parsing and merging.
#[derive(Debug)]
struct Normalized {
    category: Option<String>,
    question: Option<String>,
    answer: Option<String>,
    keywords: Option<Vec<String>>,
    is_active: bool,
    image_url: Option<String>,
}

/// Question and answer are known to be present.
#[derive(Debug)]
struct Validated {
    category: Option<String>,
    question: String,
    answer: String,
    keywords: Vec<String>,
    is_active: bool,
    image_url: Option<String>,
}

/// Stateless create pipeline; the store is passed per call.
#[derive(Debug, Clone, Default)]
pub struct FaqPipeline {
    options: PipelineOptions,
}

impl FaqPipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Run a create request through every stage and insert the result.
    pub async fn create<S>(
        &self,
        store: &S,
        request: CreateFaqRequest,
    ) -> Result<CreatedFaq, CreateError>
    where
        S: FaqStore + ?Sized,
    {
        debug!("FAQ create {}", Stage::Received);

        let normalized = self.normalize(request)?;
        debug!("FAQ create {}", Stage::Normalized);

        let validated = validate(normalized)?;
        debug!("FAQ create {}", Stage::Validated);

        let faq = self.classify(store, validated).await;
        debug!("FAQ create {}: category={:?}", Stage::Classified, faq.category);

        info!(
            "Creating FAQ: category={:?} question={:?} keywords={:?}",
            faq.category, faq.question, faq.keywords
        );
        let stored = store.insert_faq(&faq).await.map_err(|e| {
            error!("FAQ insert failed: {}", e);
            e
        })?;
        info!("FAQ created: id={}", stored.id);
        debug!("FAQ create {}", Stage::Persisted);

        Ok(CreatedFaq {
            confirmation_message: confirmation_message(&faq.question),
            faq: stored,
        })
    }

    /// Parse `raw` (if enabled and present) and merge with structured fields.
    fn normalize(&self, request: CreateFaqRequest) -> Result<Normalized, Rejection> {
        let mut normalized = Normalized {
            category: non_blank(request.category),
            question: non_blank(request.question),
            answer: non_blank(request.answer),
            keywords: request.keywords.filter(|k| !k.is_empty()),
            is_active: request.is_active.unwrap_or(true),
            image_url: non_blank(request.image_url),
        };

        let raw = if self.options.parse_raw {
            non_blank(request.raw)
        } else {
            None
        };

        if let Some(raw) = raw {
            if !is_faq_command(&raw) {
                debug!("Raw input rejected: no trigger phrase or Q/A markers");
                return Err(Rejection::InvalidFormat);
            }
            let parsed = extract_fields(&raw);
            normalized.question = normalized.question.or(parsed.question);
            normalized.answer = normalized.answer.or(parsed.answer);
            normalized.keywords = normalized.keywords.or(parsed.keywords);
        }

        Ok(normalized)
    }

    /// Fill in keywords and category.
    async fn classify<S>(&self, store: &S, validated: Validated) -> NewFaq
    where
        S: FaqStore + ?Sized,
    {
        let keywords = if validated.keywords.is_empty() {
            extract_keywords(&validated.question, &validated.answer)
        } else {
            validated.keywords
        };

        let category = resolve_category(
            store,
            &validated.question,
            validated.category.as_deref(),
            self.options.category_lookup,
        )
        .await;

        NewFaq {
            category,
            question: validated.question,
            answer: validated.answer,
            keywords,
            is_active: validated.is_active,
            image_url: validated.image_url,
        }
    }
}

fn validate(normalized: Normalized) -> Result<Validated, Rejection> {
    let (question, answer) = match (normalized.question, normalized.answer) {
        (Some(q), Some(a)) => (q, a),
        _ => return Err(Rejection::MissingFields),
    };

    let keywords = normalized
        .keywords
        .map(|k| normalize_keywords(&k))
        .unwrap_or_default();

    Ok(Validated {
        category: normalized.category,
        question,
        answer,
        keywords,
        is_active: normalized.is_active,
        image_url: normalized.image_url,
    })
}

/// Message returned to the chat user after a successful create.
pub fn confirmation_message(question: &str) -> String {
    format!("Got it. I've added your FAQ: \"{}\".", question)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
