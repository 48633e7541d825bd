//! Static step tables for the guided loan-application process
//!
//! Eight steps per loan type. Each step carries a short summary read on
//! first contact and a longer detail passage used when the user asks
//! for more information or did not understand the summary.

use loan_advisor_core::LoanType;

/// Number of steps in every loan-application script
pub const STEP_COUNT: usize = 8;

/// One step of the application script
#[derive(Debug, Clone, Copy)]
pub struct StepDefinition {
    pub title: &'static str,
    pub summary: &'static str,
    pub detail: &'static str,
}

/// Greeting spoken when a guided session opens
pub const GREETING: &str = "Hello! I'm your loan guidance agent. What type of loan are you interested in applying for? I can help with home loans, personal loans, business loans, education loans, or vehicle loans.";

/// Asked when the loan type cannot be determined from the utterance
pub const CLARIFICATION: &str = "I'm not sure which type of loan you're interested in. Could you please specify if you're looking for a home loan, personal loan, business loan, education loan, or vehicle loan?";

/// Appended after the final step instead of an understanding question
pub const COMPLETION: &str = "Congratulations! You've completed all the steps of the loan application process. Is there anything else you'd like to know about your loan?";

/// Per-step understanding check questions, asked after every non-final step
const UNDERSTANDING_QUESTIONS: [&str; STEP_COUNT] = [
    "Do you understand what documents you need to submit for the application? Do you have any questions about the application process?",
    "Do you understand how we'll evaluate your application? Is there anything about the evaluation process you'd like me to explain further?",
    "Do you understand what we'll be checking during the property/document evaluation? Do you have any concerns about this step?",
    "Do you understand what happens when we start processing your application? Is there anything about this process you'd like me to clarify?",
    "Do you understand what we'll be checking during the legal/credit assessment? Do you have any questions about this step?",
    "Do you understand how the committee makes decisions on loan sanctions? Is there anything about this process you'd like me to explain?",
    "Do you understand what original documents you'll need to provide? Do you have any questions about the collection process?",
    "Do you understand how the loan will be disbursed? Do you have any final questions about the loan release process?",
];

/// Understanding question for the given step
pub fn understanding_question(step_index: usize) -> &'static str {
    UNDERSTANDING_QUESTIONS[step_index.min(STEP_COUNT - 1)]
}

/// Step table for the given loan type
pub fn steps_for(loan_type: LoanType) -> &'static [StepDefinition; STEP_COUNT] {
    match loan_type {
        LoanType::Home => &HOME_STEPS,
        LoanType::Personal => &PERSONAL_STEPS,
        LoanType::Business => &BUSINESS_STEPS,
        LoanType::Education => &EDUCATION_STEPS,
        LoanType::Vehicle => &VEHICLE_STEPS,
    }
}

const HOME_STEPS: [StepDefinition; STEP_COUNT] = [
    StepDefinition {
        title: "Application Submission",
        summary: "For a home loan, you'll need to submit an application form with your personal details, employment information, income details, and property information.",
        detail: "For the application, you'll need ID proof (Aadhaar, PAN), address proof, income proof (salary slips, Form 16), bank statements for the last 6 months, and property documents if available.",
    },
    StepDefinition {
        title: "Evaluation of Applicant",
        summary: "We'll evaluate your application by checking your credit score, income tax returns, bank statements, and employment history to assess your repayment capacity.",
        detail: "During evaluation, we look at your credit score (ideally 750+), debt-to-income ratio (should be below 50%), employment stability (minimum 2 years preferred), and income tax returns for the last 2-3 years.",
    },
    StepDefinition {
        title: "Property & Legal Evaluation",
        summary: "Our team will evaluate the property you wish to purchase, checking its market value, legal status, and ensuring all property documents are in order.",
        detail: "Property evaluation includes checking the property's market value, legal status, construction approvals, and ensuring it's free from any encumbrances or legal disputes.",
    },
    StepDefinition {
        title: "Process Start",
        summary: "Once initial evaluations are complete, we'll start the formal processing of your application, including document verification and physical inspections.",
        detail: "The processing includes document verification, physical verification of your residence and workplace, and property inspection by our engineers.",
    },
    StepDefinition {
        title: "Legal Check",
        summary: "Our legal team will conduct a thorough check of all property documents to ensure compliance with legal norms and verify all certificates.",
        detail: "Legal checks involve title verification, encumbrance certificate verification, and checking for any pending legal issues related to the property.",
    },
    StepDefinition {
        title: "Committee Sanction",
        summary: "Your application will be reviewed by our loan committee who will make the final decision on sanctioning your loan and determine the loan amount and terms.",
        detail: "The committee considers factors like loan amount, property value, your repayment capacity, and credit history before sanctioning the loan.",
    },
    StepDefinition {
        title: "Collection & Report",
        summary: "We'll collect all original documents like property agreements and prepare a comprehensive verification report.",
        detail: "Original documents required include sale deed, previous chain of title documents, property tax receipts, and approved building plan.",
    },
    StepDefinition {
        title: "Loan Release",
        summary: "Once everything is verified and approved, the loan amount will be disbursed to your account or directly to the property seller as per your instructions.",
        detail: "Loan disbursement can be in full or in installments depending on the construction stage of the property. You'll need to sign the loan agreement and provide post-dated checks for EMI payments.",
    },
];

const PERSONAL_STEPS: [StepDefinition; STEP_COUNT] = [
    StepDefinition {
        title: "Application Submission",
        summary: "For a personal loan, you'll need to submit an application with your personal details, employment information, and income details.",
        detail: "For the application, you'll need ID proof (Aadhaar, PAN), address proof, latest salary slips, and bank statements for the last 3-6 months.",
    },
    StepDefinition {
        title: "Evaluation of Applicant",
        summary: "We'll evaluate your application by checking your credit score, income tax returns, bank statements, and employment stability.",
        detail: "During evaluation, we look at your credit score (ideally 700+), debt-to-income ratio (should be below 50%), and employment stability.",
    },
    StepDefinition {
        title: "Document Verification",
        summary: "Our team will verify all the documents you've submitted, including ID proofs, address proofs, and income documents.",
        detail: "We'll verify your identity documents, address proofs, income documents, and may contact your employer for employment verification.",
    },
    StepDefinition {
        title: "Process Start",
        summary: "Once initial evaluations are complete, we'll start the formal processing of your application.",
        detail: "The processing includes background checks and a detailed analysis of your financial health and repayment capacity.",
    },
    StepDefinition {
        title: "Credit Assessment",
        summary: "We'll conduct a detailed assessment of your credit history, existing loans, and repayment capacity.",
        detail: "Credit assessment involves checking your credit history, existing loans, credit card usage patterns, and overall financial discipline.",
    },
    StepDefinition {
        title: "Committee Sanction",
        summary: "Your application will be reviewed by our loan committee who will make the final decision on sanctioning your loan.",
        detail: "The committee considers factors like loan amount, your repayment capacity, credit history, and relationship with the bank before sanctioning the loan.",
    },
    StepDefinition {
        title: "Terms Finalization",
        summary: "We'll finalize the loan terms including interest rate, tenure, and EMI amount based on your profile.",
        detail: "Terms will include interest rate (typically 10-18% for personal loans), tenure (1-5 years), processing fees, and prepayment conditions.",
    },
    StepDefinition {
        title: "Loan Release",
        summary: "Once approved, the loan amount will be disbursed directly to your bank account, usually within 24-48 hours.",
        detail: "After approval, you'll need to sign the loan agreement, provide security post-dated checks, and the amount will be credited to your account.",
    },
];

const BUSINESS_STEPS: [StepDefinition; STEP_COUNT] = [
    StepDefinition {
        title: "Application Submission",
        summary: "For a business loan, you'll need to submit an application with your business details, financial statements, and business plan.",
        detail: "For the application, you'll need business registration documents, GST registration, business PAN, financial statements for the last 2-3 years, and a detailed business plan.",
    },
    StepDefinition {
        title: "Business Evaluation",
        summary: "We'll evaluate your business by analyzing financial statements, cash flow, business model, and market position.",
        detail: "We evaluate your business performance, revenue growth, profit margins, market position, and future projections.",
    },
    StepDefinition {
        title: "Document Verification",
        summary: "Our team will verify all business documents, including registration certificates, tax returns, and financial statements.",
        detail: "We'll verify your business registration, tax compliance, financial statements, and may conduct industry analysis to understand your business context.",
    },
    StepDefinition {
        title: "Process Start",
        summary: "Once initial evaluations are complete, we'll start the formal processing of your application, which may include a site visit to your business.",
        detail: "The processing includes site visits to your business premises, meetings with key management, and detailed financial analysis.",
    },
    StepDefinition {
        title: "Business Viability Check",
        summary: "We'll assess the viability and sustainability of your business model and growth projections.",
        detail: "We assess your business model sustainability, competitive advantages, market conditions, and growth potential to ensure long-term viability.",
    },
    StepDefinition {
        title: "Committee Sanction",
        summary: "Your application will be reviewed by our business loan committee who will make the final decision on sanctioning your loan.",
        detail: "The committee considers factors like loan amount, business performance, collateral offered, industry outlook, and your business track record.",
    },
    StepDefinition {
        title: "Collateral Assessment",
        summary: "If applicable, we'll assess the value of any collateral offered to secure the loan.",
        detail: "If you're offering collateral, we'll assess its market value, liquidity, and legal status to determine the secured portion of the loan.",
    },
    StepDefinition {
        title: "Loan Release",
        summary: "Once approved, the loan amount will be disbursed to your business account according to the agreed terms.",
        detail: "After approval, you'll need to sign the loan agreement, complete security documentation if applicable, and the amount will be credited to your business account.",
    },
];

const EDUCATION_STEPS: [StepDefinition; STEP_COUNT] = [
    StepDefinition {
        title: "Application Submission",
        summary: "For an education loan, you'll need to submit an application with your academic details, admission letter, and course information.",
        detail: "For the application, you'll need the admission letter from the institution, course details, fee structure, student's academic records, and co-applicant's financial documents.",
    },
    StepDefinition {
        title: "Student & Co-applicant Evaluation",
        summary: "We'll evaluate both the student's academic record and the co-applicant's (usually parent/guardian) financial stability.",
        detail: "We evaluate the student's academic performance and the co-applicant's income stability, credit history, and repayment capacity.",
    },
    StepDefinition {
        title: "Institution Verification",
        summary: "Our team will verify the educational institution and course details to ensure they meet our eligibility criteria.",
        detail: "We verify the recognition/accreditation of the institution, course duration, fee structure, and placement records.",
    },
    StepDefinition {
        title: "Process Start",
        summary: "Once initial evaluations are complete, we'll start the formal processing of your application.",
        detail: "The processing includes verification of all submitted documents and assessment of the education loan eligibility.",
    },
    StepDefinition {
        title: "Cost Assessment",
        summary: "We'll assess the total cost of education including tuition fees, living expenses, and other related costs.",
        detail: "We calculate the total cost including tuition fees, hostel fees, books, equipment, travel expenses, and other related costs to determine the loan amount.",
    },
    StepDefinition {
        title: "Committee Sanction",
        summary: "Your application will be reviewed by our education loan committee who will make the final decision on sanctioning your loan.",
        detail: "The committee considers factors like course prospects, institution reputation, loan amount, and co-applicant's financial stability.",
    },
    StepDefinition {
        title: "Terms Finalization",
        summary: "We'll finalize the loan terms including interest rate, repayment schedule, and moratorium period.",
        detail: "Terms will include interest rate (typically lower for education loans), moratorium period (usually course duration plus 6-12 months), and repayment tenure.",
    },
    StepDefinition {
        title: "Loan Release",
        summary: "Once approved, the loan amount will be disbursed directly to the educational institution in installments as per the fee schedule.",
        detail: "The loan amount is usually disbursed directly to the institution in installments as per the fee schedule, with living expenses portion credited to the student's account.",
    },
];

const VEHICLE_STEPS: [StepDefinition; STEP_COUNT] = [
    StepDefinition {
        title: "Application Submission",
        summary: "For a vehicle loan, you'll need to submit an application with your personal details, vehicle details, and income information.",
        detail: "For the application, you'll need ID proof, address proof, income documents, vehicle quotation from the dealer, and details of the vehicle you wish to purchase.",
    },
    StepDefinition {
        title: "Applicant Evaluation",
        summary: "We'll evaluate your application by checking your credit score, income stability, and repayment capacity.",
        detail: "We evaluate your income stability, credit score, existing loans, and overall repayment capacity.",
    },
    StepDefinition {
        title: "Vehicle Verification",
        summary: "Our team will verify the vehicle details, including make, model, price, and dealer information.",
        detail: "We verify the vehicle details, market value, dealer credentials, and ensure the vehicle meets our financing criteria.",
    },
    StepDefinition {
        title: "Process Start",
        summary: "Once initial evaluations are complete, we'll start the formal processing of your application.",
        detail: "The processing includes document verification and assessment of the loan-to-value ratio based on the vehicle type.",
    },
    StepDefinition {
        title: "Loan-to-Value Assessment",
        summary: "We'll determine the loan amount based on the vehicle value and our loan-to-value policy.",
        detail: "Typically, we finance up to 80-90% of the on-road price for new vehicles and 70-80% for used vehicles, depending on the vehicle age and condition.",
    },
    StepDefinition {
        title: "Committee Sanction",
        summary: "Your application will be reviewed by our vehicle loan committee who will make the final decision on sanctioning your loan.",
        detail: "The committee considers factors like vehicle type, loan amount, your repayment capacity, and credit history before sanctioning the loan.",
    },
    StepDefinition {
        title: "Insurance Verification",
        summary: "We'll ensure that comprehensive insurance is arranged for the vehicle as per our loan requirements.",
        detail: "Comprehensive insurance is mandatory for the entire loan tenure, with the bank as the financier/co-beneficiary in the policy.",
    },
    StepDefinition {
        title: "Loan Release",
        summary: "Once approved, the loan amount will be disbursed directly to the vehicle dealer, and you'll need to complete the registration process.",
        detail: "After approval, the loan amount is disbursed to the dealer, and you'll need to register the vehicle with the bank as the financier in the RC book.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_loan_type_has_eight_steps() {
        for loan_type in LoanType::all() {
            let steps = steps_for(loan_type);
            assert_eq!(steps.len(), STEP_COUNT);
            for step in steps {
                assert!(!step.title.is_empty());
                assert!(!step.summary.is_empty());
                assert!(!step.detail.is_empty());
            }
        }
    }

    #[test]
    fn test_every_script_ends_with_release() {
        for loan_type in LoanType::all() {
            assert_eq!(steps_for(loan_type)[STEP_COUNT - 1].title, "Loan Release");
        }
    }

    #[test]
    fn test_question_index_clamped() {
        assert_eq!(
            understanding_question(99),
            UNDERSTANDING_QUESTIONS[STEP_COUNT - 1]
        );
    }
}
