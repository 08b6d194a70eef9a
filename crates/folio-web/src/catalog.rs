#![forbid(unsafe_code)]

//! Static page content: projects, skills, and the section layout.

use folio_widgets::category_filter::Categorized;
use folio_widgets::scroll_spy::Section;
use serde::Serialize;

/// A portfolio project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub category: &'static str,
}

impl Categorized for Project {
    fn category(&self) -> &str {
        self.category
    }
}

/// A skill badge with a proficiency level out of 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub name: &'static str,
    pub level: u8,
    pub category: &'static str,
}

impl Categorized for Skill {
    fn category(&self) -> &str {
        self.category
    }
}

/// Project filter buttons after "All Projects".
pub const PROJECT_CATEGORIES: [(&str, &str); 2] = [("ml", "ML & AI"), ("web", "Web Apps")];

/// Skill filter buttons after "All Skills".
pub const SKILL_CATEGORIES: [(&str, &str); 4] = [
    ("ml", "ML & AI"),
    ("backend", "Backend"),
    ("frontend", "Frontend"),
    ("other", "DevOps"),
];

/// Navigable sections, top to bottom.
#[must_use]
pub fn sections() -> Vec<Section> {
    [
        ("home", "Home"),
        ("about", "About"),
        ("skills", "Skills"),
        ("projects", "Projects"),
        ("contact", "Contact"),
    ]
    .into_iter()
    .zip(0..)
    .map(|((id, label), order)| Section::new(id, label, order))
    .collect()
}

macro_rules! project {
    ($id:expr, $cat:expr, $title:expr, $desc:expr, [$($tag:expr),* $(,)?]) => {
        Project {
            id: $id,
            title: $title,
            description: $desc,
            tags: &[$($tag),*],
            category: $cat,
        }
    };
}

#[must_use]
pub fn projects() -> Vec<Project> {
    vec![
        project!(
            1,
            "ml",
            "Taxline AI - Invoice Automation Suite",
            "Invoice automation that extracts PDF invoice data with GPT-4o, enriches it with \
             chart-of-accounts, VAT and business-line mappings, and syncs to accounting \
             over a signed API.",
            ["FastAPI", "Next.js 15", "GPT-4o", "PostgreSQL", "React 19", "TypeScript", "AI"]
        ),
        project!(
            2,
            "ml",
            "ResuForge - MCP-Powered Resume Builder",
            "Resume generation with Model Context Protocol agents, a chat interface, live \
             preview, job-description tailoring, and PDF/DOCX export.",
            ["FastAPI", "MCP", "React", "OpenAI", "PostgreSQL", "TailwindCSS"]
        ),
        project!(
            3,
            "ml",
            "AI-Powered Cold Email Generation Tool",
            "Personalized cold emails from LinkedIn, CRM and company data, with a board-style \
             dashboard and Stripe billing.",
            ["React", "FastAPI", "GPT-4", "Supabase", "Stripe", "TailwindCSS"]
        ),
        project!(
            4,
            "ml",
            "Formulai - DNA-Based Wellness Platform",
            "Personalized health recommendations from DNA analysis on a Django REST backend \
             with a React TypeScript frontend.",
            ["Django", "React", "TypeScript", "OpenAI", "PostgreSQL", "REST API"]
        ),
        project!(
            5,
            "ml",
            "MCQ-Based Exam Prep System",
            "Adaptive exam preparation with NLP-generated multiple-choice questions and \
             real-time feedback.",
            ["Django", "Next.js", "NLP", "NLTK", "SpaCy", "Python"]
        ),
        project!(
            6,
            "ml",
            "ShopAI - E-Commerce with AI Recommendations",
            "Storefront with KNN content-based recommendations by preference, region and age, \
             plus PayPal checkout.",
            ["Django", "KNN", "Machine Learning", "PayPal", "HTML/CSS", "JavaScript"]
        ),
        project!(
            7,
            "web",
            "Dashboard for POS System",
            "Point-of-sale analytics: sales performance, inventory levels and customer \
             behavior as live KPIs.",
            ["Flask", "Plotly", "Dash", "SQL", "Pandas", "Data Visualization"]
        ),
        project!(
            8,
            "ml",
            "Nexora Notepad Agent",
            "Desktop automation that writes word-count-specific content from natural language \
             commands and saves it through Notepad.",
            ["Python", "OpenAI", "PyAutoGUI", "Automation", "NLP"]
        ),
        project!(
            9,
            "ml",
            "AI Code Quality Evaluator - Gemini AI",
            "Side-by-side evaluation of generated ML/DL code: test design, sandboxed \
             execution, and security review.",
            ["Python", "PyTorch", "TensorFlow", "Scikit-learn", "Gemini AI", "Flask"]
        ),
    ]
}

const SKILLS: &[(&str, u8, &str)] = &[
    ("Prompt Engineering", 95, "ml"),
    ("RAG", 90, "ml"),
    ("LangChain", 90, "ml"),
    ("LlamaIndex", 85, "ml"),
    ("LangGraph", 85, "ml"),
    ("LLM APIs", 90, "ml"),
    ("Multi-Agent Systems", 85, "ml"),
    ("Function Calling", 85, "ml"),
    ("Transformers", 85, "ml"),
    ("Hugging Face", 85, "ml"),
    ("PEFT/LoRA", 80, "ml"),
    ("Prompt Tuning", 85, "ml"),
    ("NLP (Sentiment, NER)", 90, "ml"),
    ("Computer Vision", 85, "ml"),
    ("YOLOv8", 85, "ml"),
    ("Object Detection", 85, "ml"),
    ("XGBoost", 90, "ml"),
    ("Random Forest", 90, "ml"),
    ("SVM", 85, "ml"),
    ("KNN", 85, "ml"),
    ("Model Evaluation", 90, "ml"),
    ("Feature Engineering", 90, "ml"),
    ("EDA", 95, "ml"),
    ("Pandas", 95, "ml"),
    ("NumPy", 95, "ml"),
    ("Seaborn", 90, "ml"),
    ("Matplotlib", 90, "ml"),
    ("Plotly", 90, "ml"),
    ("Autogen", 85, "ml"),
    ("CrewAI", 85, "ml"),
    ("OpenAI Agents", 90, "ml"),
    ("n8n Agents", 85, "ml"),
    ("Custom Voice Agents", 85, "ml"),
    ("Chatbots", 90, "ml"),
    ("Streamlit", 95, "frontend"),
    ("React", 80, "frontend"),
    ("JavaScript", 75, "frontend"),
    ("TypeScript", 70, "frontend"),
    ("Python", 95, "backend"),
    ("Django", 95, "backend"),
    ("FastAPI", 95, "backend"),
    ("RESTful APIs", 90, "backend"),
    ("SQL", 90, "backend"),
    ("PostgreSQL", 90, "backend"),
    ("MySQL", 90, "backend"),
    ("MongoDB", 85, "backend"),
    ("Neo4j", 80, "backend"),
    ("Qdrant", 85, "backend"),
    ("Pinecone", 85, "backend"),
    ("Git", 95, "other"),
    ("GitHub Actions", 85, "other"),
    ("Docker", 85, "other"),
    ("Linux", 85, "other"),
    ("AWS", 80, "other"),
    ("Jupyter", 95, "other"),
    ("VS Code", 95, "other"),
    ("Postman", 90, "other"),
    ("Zapier", 85, "other"),
    ("Make.com", 85, "other"),
    ("Airtable", 80, "other"),
    ("Notion", 85, "other"),
    ("Technical Documentation", 90, "other"),
];

#[must_use]
pub fn skills() -> Vec<Skill> {
    SKILLS
        .iter()
        .map(|&(name, level, category)| Skill {
            name,
            level,
            category,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_ids_are_unique_and_categorized() {
        let projects = projects();
        let mut ids: Vec<u32> = projects.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), projects.len());
        for p in &projects {
            assert!(
                PROJECT_CATEGORIES.iter().any(|(id, _)| *id == p.category),
                "{} has undeclared category {}",
                p.title,
                p.category
            );
        }
    }

    #[test]
    fn skill_categories_are_declared() {
        for s in skills() {
            assert!(SKILL_CATEGORIES.iter().any(|(id, _)| *id == s.category));
            assert!(s.level <= 100);
        }
    }

    #[test]
    fn sections_are_ordered() {
        let orders: Vec<i32> = sections().iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3, 4]);
    }
}
