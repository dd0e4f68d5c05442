// src/optimizer/prompts.rs
// Prompt text sent with every optimization request.

/// ATS rules the model must follow when rewriting a resume
pub const ATS_RULES: &str = "\
CRITICAL RULES FOR 100% MATCHING:
1. KEYWORD INJECTION: Extract every single technical skill, tool, and soft skill from the Job Description. \
Naturally weave these into the Professional Summary and Experience bullet points.
2. STANDARD HEADINGS: Use only standard headings: SUMMARY, EXPERIENCE, EDUCATION, SKILLS. \
Do not use creative titles like \"My Journey\" or \"Expertise\".
3. BULLET POINTS: Every bullet point must be accomplishment-driven using the STAR method \
(Situation, Task, Action, Result) or XYZ method (Accomplished [X] as measured by [Y], by doing [Z]).
4. NO GRAPHICS: Ensure the text content is pure and avoids any reliance on non-text elements.
5. ATS COMPATIBILITY: Ensure dates use standard formats (e.g., \"Jan 2020 - Present\") \
and job titles are clearly stated.";

/// Full user prompt embedding the resume and the job description
pub fn optimization_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "Act as a World Class Resume Writer specializing in 100% ATS (Applicant Tracking System) Matching.\n\n\
         {rules}\n\n\
         Analyze the provided Resume and Job Description. Optimize the resume for a 100% match. \
         Score the match of the optimized resume from 0 to 100 in atsScore.\n\n\
         Current Resume:\n{resume}\n\n\
         Job Description:\n{job}\n",
        rules = ATS_RULES,
        resume = resume_text.trim(),
        job = job_description.trim(),
    )
}
