pub mod mock_page;
