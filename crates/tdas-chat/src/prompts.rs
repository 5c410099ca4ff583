/// Reply used when no table has been loaded yet. Returned without
/// contacting the endpoint.
pub const NO_DATA_REPLY: &str =
    "Please upload at least one CSV file (trades.csv or holdings.csv) to get started.";

/// The refusal sentence the model is instructed to use verbatim when the
/// answer is not present in the supplied data.
pub const REFUSAL_SENTENCE: &str = "Sorry, I cannot find the answer in the provided data.";

/// Build the system instruction embedding the data context report.
///
/// The policy pins the model to the supplied data and steers it towards
/// the precomputed aggregates instead of re-deriving numbers from the
/// sample rows.
pub fn system_prompt(context: &str) -> String {
    format!(
        "You are a helpful financial data analyst assistant. You have access to trading and \
         holdings data uploaded by the user.\n\n\
         IMPORTANT INSTRUCTIONS:\n\
         1. Answer questions ONLY based on the data provided below\n\
         2. If you cannot find the answer in the data, respond with: \"{REFUSAL_SENTENCE}\"\n\
         3. Do NOT use external knowledge or make assumptions beyond the data\n\
         4. Be specific and provide numbers when available\n\
         5. The data summary below contains COMPLETE AGGREGATIONS - use these for accurate answers\n\
         6. For fund performance, the PL_YTD (Year-to-Date Profit & Loss) totals are already calculated below\n\n\
         DATA SUMMARY:\n\n\
         {context}\n\n\
         KEY NOTES:\n\
         - The \"Year-to-Date Profit & Loss (PL_YTD) by fund\" section shows the TOTAL PL_YTD for each fund (already summed)\n\
         - The \"Holdings count by fund\" shows how many holdings each fund has\n\
         - The \"Best performing fund\" is already identified in the data summary\n\
         - Use the aggregated statistics above to answer questions about totals, counts, and comparisons"
    )
}
