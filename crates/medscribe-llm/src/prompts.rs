//! Instruction templates for each model-backed analysis.

pub fn sentiment(text: &str) -> String {
    format!(
        r#"Classify the patient's sentiment from this text as one of: Anxious, Neutral, or Reassured.

Text: {text}

Respond with only the sentiment label and a confidence score (0.0-1.0) as JSON: {{"sentiment": "...", "confidence": 0.0}}
"#
    )
}

pub fn intent(text: &str) -> String {
    format!(
        r#"Classify patient intent from this medical conversation. Choose ONE:
- "Seeking reassurance" - Patient asking if they'll be okay, expressing worry about recovery
- "Reporting symptoms" - Patient describing current or past symptoms
- "Reporting recovery status" - Patient updating on improvement/progress
- "Providing history" - Patient recounting past events, medical history
- "Expressing concern" - Patient showing worry or anxiety
- "Requesting treatment plan" - Patient actively asking what to do next for treatment

Text: {text}

Respond with JSON: {{"intent": "...", "confidence": 0.0}}"#
    )
}

pub fn summary(transcript: &str) -> String {
    format!(
        r#"Extract medical info as JSON from this transcript:
- Patient_Name: Full name (e.g., "Janet Jones" not "Ms. Jones")
- Symptoms: List of medical symptoms/phrases
- Diagnosis: Medical diagnosis
- Treatment: List of treatments/therapies
- Current_Status: Current patient condition
- Prognosis: Expected outcome

Use "Unknown" if missing. Return JSON only. Transcript: {transcript}"#
    )
}

pub fn soap_note(transcript: &str) -> String {
    format!(
        r#"Create a clinical SOAP note JSON from this medical transcript:

Subjective:
- Chief_Complaint: Clinical description (e.g., "Intermittent neck and back discomfort following motor vehicle accident")
- History_of_Present_Illness: Detailed timeline and progression

Objective:
- Physical_Exam: Clinical findings (range of motion, tenderness, etc.)
- Observations: Other relevant observations

Assessment:
- Diagnosis: Clinical diagnosis
- Severity: Mild/Moderate/Severe

Plan:
- Treatment: Only active treatments needed. If patient improving, state "No active treatment required; continue home exercises as advised" or similar
- Follow_Up: Follow-up recommendations

Use clinical language. Use "Unknown" if data absent. Return JSON only. Transcript: {transcript}"#
    )
}
