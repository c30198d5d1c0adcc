// Prompt constants for resume advice generation.
// The system fragment comes from llm_client::prompts.

/// Keywords from each list that are shown to the model.
pub const PROMPT_KEYWORD_LIMIT: usize = 8;

/// Advice prompt template. Replace `{score}`, `{missing}` and `{shared}` before sending.
pub const ADVICE_PROMPT_TEMPLATE: &str = r#"You are an expert ATS (Applicant Tracking System) resume consultant helping candidates optimize their resumes for specific job postings.

**Resume Analysis:**
- Match Score: {score}
- Missing Keywords: {missing}
- Shared Keywords: {shared}

**Your Task:**
Provide actionable, specific resume advice in JSON format. Focus on concrete improvements that will increase the ATS match score.

Use this exact structure:

{
  "skills_to_add": ["skill1", "skill2", "skill3"],
  "skills_to_emphasize": ["existing_skill1", "existing_skill2"],
  "resume_structure": ["tip1", "tip2", "tip3"],
  "content_optimization": ["tip1", "tip2", "tip3"],
  "keyword_strategy": "One clear paragraph explaining how to naturally integrate missing keywords",
  "overall_priority": ["top_priority1", "top_priority2", "top_priority3"]
}

**Guidelines:**
- skills_to_add: 3-5 most critical missing keywords/skills from the job description
- skills_to_emphasize: 2-4 existing skills that match the job and should be highlighted more prominently
- resume_structure: 2-4 specific formatting/organization tips for ATS optimization
- content_optimization: 2-4 specific tips for improving bullet points and descriptions
- keyword_strategy: one actionable paragraph (2-3 sentences) on incorporating missing keywords naturally
- overall_priority: 2-4 most important actions to take immediately, ordered by impact

Respond with valid JSON only."#;

pub const FALLBACK_SKILLS_TO_ADD: &str = "Review job requirements carefully";
pub const FALLBACK_SKILLS_TO_EMPHASIZE: &str = "Highlight your relevant experience";

pub const FALLBACK_RESUME_STRUCTURE: &[&str] = &[
    "Use clear section headers: Summary, Experience, Skills, Education",
    "Use bullet points with strong action verbs (developed, implemented, led)",
    "Keep formatting simple and ATS-friendly (avoid tables, text boxes, headers/footers)",
    "Include a dedicated 'Technical Skills' or 'Core Competencies' section",
];

pub const FALLBACK_CONTENT_OPTIMIZATION: &[&str] = &[
    "Quantify achievements with specific metrics and results (e.g., 'Increased efficiency by 30%')",
    "Tailor experience descriptions to match job requirements and use similar language",
    "Use industry-standard terminology and avoid uncommon abbreviations",
    "Start each bullet point with a strong action verb in past tense",
];

pub const FALLBACK_KEYWORD_STRATEGY: &str = "Naturally integrate the missing keywords throughout your resume, \
    especially in your skills section and experience descriptions. Focus on incorporating them in context \
    rather than simply listing them. Use variations of the keywords where appropriate to demonstrate \
    comprehensive understanding.";

pub const FALLBACK_OVERALL_PRIORITY: &[&str] = &[
    "Add the top 3-5 missing technical skills to your resume if you have them",
    "Quantify your achievements with specific numbers, percentages, or outcomes",
    "Tailor your professional summary to highlight experience relevant to this role",
    "Ensure your skills section prominently features keywords from the job description",
];
