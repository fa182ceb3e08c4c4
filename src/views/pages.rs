//! Landing, success and error pages.
//!
//! Only the filename and the shareable URL come from outside; both are
//! escaped before they reach the markup.

use super::layout::{document, html_escape};

/// `GET /` — upload form.
pub fn landing_page() -> String {
    document(
        "Share a File",
        r#"<main class="flex-grow container mx-auto px-4 py-8 sm:py-12">
  <div class="max-w-3xl mx-auto bg-white rounded-xl shadow-md overflow-hidden p-6 sm:p-8">
    <div class="text-center mb-6 sm:mb-8">
      <h1 class="text-xl sm:text-2xl font-bold text-gray-800 mb-2">Share a file in seconds</h1>
      <p class="text-gray-600 text-sm sm:text-base">Upload a file to get a shareable link and a QR code.</p>
    </div>
    <form action="/upload" method="post" enctype="multipart/form-data" class="flex flex-col items-center gap-4">
      <input id="file" name="file" type="file" required
        class="block w-full text-sm text-gray-700 border border-gray-300 rounded-lg cursor-pointer bg-gray-50 p-2">
      <button type="submit"
        class="bg-blue-600 hover:bg-blue-700 text-white px-5 py-2 sm:px-6 sm:py-3 rounded-lg text-sm sm:text-base font-medium transition-colors">
        Upload
      </button>
    </form>
  </div>
</main>"#,
    )
}

/// Confirmation page shown after a successful upload.
pub fn success_page(filename: &str, url: &str, qr_data_url: &str) -> String {
    let body = format!(
        r#"<main class="flex-grow container mx-auto px-4 py-8 sm:py-12">
  <div class="max-w-3xl mx-auto bg-white rounded-xl shadow-md overflow-hidden p-6 sm:p-8">
    <div class="text-center mb-6 sm:mb-8">
      <div class="w-14 h-14 sm:w-16 sm:h-16 bg-green-100 rounded-full flex items-center justify-center mx-auto mb-3 sm:mb-4">
        <svg class="w-6 h-6 sm:w-8 sm:h-8 text-green-600" fill="none" stroke="currentColor" viewBox="0 0 24 24">
          <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M5 13l4 4L19 7"></path>
        </svg>
      </div>
      <h1 class="text-xl sm:text-2xl font-bold text-gray-800 mb-2">Upload Successful!</h1>
      <p class="text-gray-600 text-sm sm:text-base">Your file is now available at:</p>
    </div>

    <div class="mb-6 sm:mb-8">
      <div class="flex items-center justify-between bg-gray-100 rounded-lg p-3 sm:p-4 mb-3 sm:mb-4">
        <p class="truncate text-xs sm:text-sm font-medium text-gray-700">{filename}</p>
      </div>

      <div class="bg-gray-100 rounded-lg p-3 sm:p-4 mb-4 sm:mb-6">
        <p class="text-xs sm:text-sm font-medium text-gray-500 mb-1">Shareable Link</p>
        <div class="flex flex-col sm:flex-row gap-2 sm:gap-0">
          <input id="fileUrl" type="text" value="{url}" readonly
            class="flex-grow bg-white border border-gray-300 rounded-lg sm:rounded-l-lg sm:rounded-r-none px-3 sm:px-4 py-2 text-xs sm:text-sm focus:outline-none focus:ring-2 focus:ring-blue-500">
          <button onclick="copyToClipboard()"
            class="bg-blue-600 hover:bg-blue-700 text-white px-4 py-2 rounded-lg sm:rounded-r-lg sm:rounded-l-none text-xs sm:text-sm font-medium transition-colors">
            Copy
          </button>
        </div>
      </div>

      <div class="text-center">
        <p class="text-xs sm:text-sm font-medium text-gray-500 mb-3 sm:mb-4">Scan QR Code to access file</p>
        <div class="flex justify-center">
          <img src="{qr}" alt="QR Code" class="w-40 h-40 sm:w-48 sm:h-48 border-4 border-white shadow-lg rounded-lg">
        </div>
      </div>
    </div>

    <div class="flex justify-center">
      <a href="/" class="bg-blue-600 hover:bg-blue-700 text-white px-5 py-2 sm:px-6 sm:py-3 rounded-lg text-sm sm:text-base font-medium transition-colors">
        Upload Another File
      </a>
    </div>
  </div>
</main>
<script>
  function copyToClipboard() {{
    const input = document.getElementById('fileUrl');
    input.select();
    navigator.clipboard.writeText(input.value).then(() => alert('Link copied to clipboard!'));
  }}
</script>"#,
        filename = html_escape(filename),
        url = html_escape(url),
        qr = html_escape(qr_data_url),
    );

    document("Upload Successful", &body)
}

/// Fixed page used for every failed upload.
pub fn error_page() -> String {
    document(
        "Upload Failed",
        r#"<main class="flex-grow container mx-auto px-4 py-8 sm:py-12">
  <div class="max-w-3xl mx-auto bg-white rounded-xl shadow-md overflow-hidden p-6 sm:p-8 text-center">
    <div class="w-14 h-14 sm:w-16 sm:h-16 bg-red-100 rounded-full flex items-center justify-center mx-auto mb-3 sm:mb-4">
      <svg class="w-6 h-6 sm:w-8 sm:h-8 text-red-600" fill="none" stroke="currentColor" viewBox="0 0 24 24">
        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"></path>
      </svg>
    </div>
    <h1 class="text-xl sm:text-2xl font-bold text-gray-800 mb-2">Upload Failed</h1>
    <p class="text-gray-600 text-sm sm:text-base mb-6">We couldn't process your file. Please make sure you selected a file and try again.</p>
    <a href="/" class="bg-blue-600 hover:bg-blue-700 text-white px-5 py-2 sm:px-6 sm:py-3 rounded-lg text-sm sm:text-base font-medium transition-colors">
      Try Again
    </a>
  </div>
</main>"#,
    )
}
